//! Error types for the linear-algebra kernel.

use thiserror::Error;

/// Result type for kernel operations.
pub type LinalgResult<T> = Result<T, LinalgError>;

/// Errors raised by vector and matrix operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// Operand sizes do not match.
    #[error("dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch {
        /// Number of components the operation needs.
        expected: usize,
        /// Number of components supplied.
        actual: usize,
    },

    /// Division by exactly zero, or normalization of a zero-length vector.
    #[error("division by zero")]
    DivideByZero,

    /// Inverse requested for a matrix whose determinant is zero.
    #[error("matrix has no inverse")]
    SingularMatrix,

    /// The linear system is inconsistent.
    #[error("there are no solutions")]
    NoSolution,

    /// Component access outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of addressable components.
        len: usize,
    },
}
