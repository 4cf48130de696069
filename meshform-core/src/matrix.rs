//! Square single-precision matrices, determinants, inverses and a
//! Gaussian-elimination solver.

use std::fmt;
use std::ops::{Add, Index, Mul, Sub};

use approx::AbsDiffEq;
use nalgebra::SMatrix;

use crate::error::{LinalgError, LinalgResult};
use crate::vector::Vector;

/// Tolerance used by `==` on matrices.
pub const MATRIX_EPSILON: f32 = 1e-5;

/// [`Matrix::inverse`] treats a determinant as zero when its magnitude is at
/// most this fraction of the summed magnitudes of its first-row expansion terms.
pub const SINGULAR_EPSILON: f32 = 1e-6;

/// Relative tolerance below which an eliminated coefficient counts as zero.
const PIVOT_EPSILON: f32 = 1e-5;

/// Value given to free variables of a rank-deficient system.
const FREE_VARIABLE_DEFAULT: f32 = 1.0;

/// An N×N matrix of `f32`.
///
/// Entries are stored row-major, so flat index `i * N + j` addresses row `i`,
/// column `j` (see [`Matrix::from_row_major`] and [`Matrix::to_row_major`]).
#[derive(Debug, Clone, Copy)]
pub struct Matrix<const N: usize> {
    rows: [[f32; N]; N],
}

pub type Matrix3 = Matrix<3>;
pub type Matrix4 = Matrix<4>;

impl<const N: usize> Matrix<N> {
    pub const fn from_rows(rows: [[f32; N]; N]) -> Self {
        Self { rows }
    }

    /// Build a matrix from `N * N` row-major entries.
    pub fn from_row_major(entries: &[f32]) -> LinalgResult<Self> {
        if entries.len() != N * N {
            return Err(LinalgError::DimensionMismatch {
                expected: N * N,
                actual: entries.len(),
            });
        }
        Ok(Self::from_fn(|i, j| entries[i * N + j]))
    }

    pub fn from_fn(f: impl Fn(usize, usize) -> f32) -> Self {
        Self {
            rows: std::array::from_fn(|i| std::array::from_fn(|j| f(i, j))),
        }
    }

    pub fn to_row_major(&self) -> Vec<f32> {
        self.rows.iter().flatten().copied().collect()
    }

    pub fn zeros() -> Self {
        Self::from_rows([[0.0; N]; N])
    }

    /// Diagonal matrix with `value` on the diagonal.
    pub fn scaled_identity(value: f32) -> Self {
        Self::from_fn(|i, j| if i == j { value } else { 0.0 })
    }

    pub fn identity() -> Self {
        Self::scaled_identity(1.0)
    }

    /// Entry at (`row`, `col`), or [`LinalgError::IndexOutOfRange`] with the
    /// flat row-major index.
    pub fn get(&self, row: usize, col: usize) -> LinalgResult<f32> {
        if row >= N || col >= N {
            return Err(LinalgError::IndexOutOfRange {
                index: row * N + col,
                len: N * N,
            });
        }
        Ok(self.rows[row][col])
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(|i, j| self.rows[j][i])
    }

    pub fn div_scalar(&self, divisor: f32) -> LinalgResult<Self> {
        if divisor == 0.0 {
            return Err(LinalgError::DivideByZero);
        }
        Ok(self.map(|e| e / divisor))
    }

    /// Determinant by cofactor expansion (direct formula up to 3×3).
    pub fn determinant(&self) -> f32 {
        determinant_of(&self.to_row_major(), N)
    }

    /// Determinant of the matrix with `row` and `col` removed.
    pub fn minor(&self, row: usize, col: usize) -> f32 {
        determinant_of(&minor_entries(&self.to_row_major(), N, row, col), N - 1)
    }

    pub fn cofactor(&self, row: usize, col: usize) -> f32 {
        let minor = self.minor(row, col);
        if (row + col) % 2 == 0 {
            minor
        } else {
            -minor
        }
    }

    /// Transposed cofactor matrix.
    pub fn adjugate(&self) -> Self {
        Self::from_fn(|i, j| self.cofactor(j, i))
    }

    /// Inverse via adjugate / determinant.
    ///
    /// The determinant is expanded along the first row, whose cofactors are
    /// the first column of the adjugate. A determinant that cancels down to
    /// almost nothing relative to its terms marks the matrix singular, so the
    /// test does not depend on the overall magnitude of the entries.
    pub fn inverse(&self) -> LinalgResult<Self> {
        let adjugate = self.adjugate();
        let (det, scale) = (0..N).fold((0.0_f32, 0.0_f32), |(det, scale), j| {
            let term = self.rows[0][j] * adjugate.rows[j][0];
            (det + term, scale + term.abs())
        });
        if det.abs() <= SINGULAR_EPSILON * scale {
            return Err(LinalgError::SingularMatrix);
        }
        adjugate.div_scalar(det)
    }

    /// Transpose of the inverse, the matrix that carries surface normals.
    pub fn inverse_transpose(&self) -> LinalgResult<Self> {
        Ok(self.inverse()?.transpose())
    }

    /// True when this is the identity within `epsilon`.
    pub fn is_identity(&self, epsilon: f32) -> bool {
        self.approx_eq(&Self::identity(), epsilon)
    }

    /// True when this is a non-zero multiple of the identity within `epsilon`.
    pub fn is_scalar_identity(&self, epsilon: f32) -> bool {
        let Some(&diagonal) = self.rows.first().and_then(|row| row.first()) else {
            return false;
        };
        diagonal.abs() >= epsilon && self.approx_eq(&Self::scaled_identity(diagonal), epsilon)
    }

    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }

    /// Solve `self · x = rhs` by Gaussian elimination.
    ///
    /// The system is reduced to row-echelon form with partial pivoting and
    /// then back-substituted. An all-zero coefficient row paired with a
    /// non-zero right-hand side makes the system inconsistent and yields
    /// [`LinalgError::NoSolution`]. A consistent rank-deficient system is not
    /// an error: free variables take the value `1.0` and the matching
    /// particular solution is returned.
    pub fn solve(&self, rhs: &Vector<N>) -> LinalgResult<Vector<N>> {
        let mut a = self.rows;
        let mut b = *rhs.as_array();

        // Pivots are judged against the coefficients, leftover right-hand
        // sides against the largest value that entered them.
        let tolerance = PIVOT_EPSILON * self.max_abs_entry();
        let mut rhs_scale = b.iter().fold(0.0_f32, |acc, e| acc.max(e.abs()));

        let mut pivot_columns = Vec::with_capacity(N);
        let mut pivot_row = 0;

        for col in 0..N {
            if pivot_row == N {
                break;
            }

            let Some(best) =
                (pivot_row..N).max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))
            else {
                break;
            };
            if a[best][col].abs() <= tolerance {
                continue;
            }

            a.swap(pivot_row, best);
            b.swap(pivot_row, best);

            let pivot = a[pivot_row];
            let pivot_rhs = b[pivot_row];
            for row in pivot_row + 1..N {
                let factor = a[row][col] / pivot[col];
                if factor == 0.0 {
                    continue;
                }
                for (target, source) in a[row].iter_mut().zip(pivot.iter()).skip(col) {
                    *target -= factor * source;
                }
                a[row][col] = 0.0;
                b[row] -= factor * pivot_rhs;
                rhs_scale = rhs_scale.max((factor * pivot_rhs).abs());
            }

            pivot_columns.push(col);
            pivot_row += 1;
        }

        // Rows past the last pivot have (near) zero coefficients.
        let rhs_tolerance = PIVOT_EPSILON * rhs_scale;
        if b[pivot_row..].iter().any(|value| value.abs() > rhs_tolerance) {
            return Err(LinalgError::NoSolution);
        }

        let mut solution = [FREE_VARIABLE_DEFAULT; N];
        for (row, &col) in pivot_columns.iter().enumerate().rev() {
            let known: f32 = (col + 1..N).map(|k| a[row][k] * solution[k]).sum();
            solution[col] = (b[row] - known) / a[row][col];
        }

        Ok(Vector::from_array(solution))
    }

    fn max_abs_entry(&self) -> f32 {
        self.rows.iter().flatten().fold(0.0, |acc, e| acc.max(e.abs()))
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::from_fn(|i, j| f(self.rows[i][j]))
    }
}

/// Determinant of an `n`×`n` row-major matrix.
fn determinant_of(m: &[f32], n: usize) -> f32 {
    match n {
        0 => 1.0,
        1 => m[0],
        2 => m[0] * m[3] - m[1] * m[2],
        3 => {
            m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
                + m[2] * (m[3] * m[7] - m[4] * m[6])
        }
        _ => (0..n)
            .filter(|&col| m[col] != 0.0)
            .map(|col| {
                let sign = if col % 2 == 0 { 1.0 } else { -1.0 };
                sign * m[col] * determinant_of(&minor_entries(m, n, 0, col), n - 1)
            })
            .sum(),
    }
}

/// Row-major entries of `m` with `skip_row` and `skip_col` removed.
fn minor_entries(m: &[f32], n: usize, skip_row: usize, skip_col: usize) -> Vec<f32> {
    (0..n)
        .filter(|&r| r != skip_row)
        .flat_map(|r| {
            (0..n)
                .filter(move |&c| c != skip_col)
                .map(move |c| m[r * n + c])
        })
        .collect()
}

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const N: usize> Add for Matrix<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_fn(|i, j| self.rows[i][j] + rhs.rows[i][j])
    }
}

impl<const N: usize> Sub for Matrix<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_fn(|i, j| self.rows[i][j] - rhs.rows[i][j])
    }
}

impl<const N: usize> Mul<f32> for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        self.map(|e| e * rhs)
    }
}

impl<const N: usize> Mul<Vector<N>> for Matrix<N> {
    type Output = Vector<N>;

    fn mul(self, rhs: Vector<N>) -> Vector<N> {
        Vector::from_array(std::array::from_fn(|i| {
            self.rows[i]
                .iter()
                .zip(rhs.as_array())
                .map(|(a, b)| a * b)
                .sum()
        }))
    }
}

impl<const N: usize> Mul for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_fn(|i, j| (0..N).map(|k| self.rows[i][k] * rhs.rows[k][j]).sum())
    }
}

impl<const N: usize> Index<(usize, usize)> for Matrix<N> {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.rows[row][col]
    }
}

impl<const N: usize> PartialEq for Matrix<N> {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, MATRIX_EPSILON)
    }
}

impl<const N: usize> AbsDiffEq for Matrix<N> {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        MATRIX_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<const N: usize> From<SMatrix<f32, N, N>> for Matrix<N> {
    fn from(m: SMatrix<f32, N, N>) -> Self {
        Self::from_fn(|i, j| m[(i, j)])
    }
}

impl<const N: usize> From<Matrix<N>> for SMatrix<f32, N, N> {
    fn from(m: Matrix<N>) -> Self {
        SMatrix::from_fn(|i, j| m.rows[i][j])
    }
}

impl<const N: usize> fmt::Display for Matrix<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", Vector::from_array(*row))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::{Vector3, Vector4};
    use approx::assert_abs_diff_eq;

    fn m3(entries: [f32; 9]) -> Matrix3 {
        Matrix3::from_row_major(&entries).unwrap()
    }

    fn m4(entries: [f32; 16]) -> Matrix4 {
        Matrix4::from_row_major(&entries).unwrap()
    }

    #[test]
    fn test_row_major_layout() {
        let m = m3([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(m[(1, 2)], 5.0);
        assert_eq!(m.get(2, 0), Ok(6.0));
        assert_eq!(
            m.get(3, 0),
            Err(LinalgError::IndexOutOfRange { index: 9, len: 9 })
        );
        assert_eq!(
            Matrix4::from_row_major(&[1.0; 9]).unwrap_err(),
            LinalgError::DimensionMismatch {
                expected: 16,
                actual: 9
            }
        );
    }

    #[test]
    fn test_scaled_identity() {
        let m = m3([5.4, 0.0, 0.0, 0.0, 5.4, 0.0, 0.0, 0.0, 5.4]);
        assert_eq!(Matrix3::scaled_identity(5.4).to_row_major(), m.to_row_major());
        assert_eq!(Matrix4::scaled_identity(3.0), Matrix4::identity() * 3.0);
        assert!(Matrix4::identity().is_identity(1e-7));
        assert!(!Matrix4::scaled_identity(3.0).is_identity(1e-7));
    }

    #[test]
    fn test_scalar_identity() {
        assert!(Matrix3::scaled_identity(-0.5).is_scalar_identity(1e-7));
        assert!(!m3([-0.5, 6.0, 0.0, 0.0, -0.5, -0.5, 0.0, 0.0, -0.5]).is_scalar_identity(1e-7));
        assert!(!Matrix3::zeros().is_scalar_identity(1e-7));
        assert!(Matrix4::scaled_identity(3.0).is_scalar_identity(1e-7));
        assert!(!m4([
            3.0, 0.0, 0.4, 0.0, 0.0, 3.0, 0.0, 0.0, 6.5, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 3.0
        ])
        .is_scalar_identity(1e-7));
    }

    #[test]
    fn test_zero_matrix() {
        assert_eq!(Matrix3::zeros().to_row_major(), vec![0.0; 9]);
    }

    #[test]
    fn test_transpose() {
        let m = m3([0.0, 1.1, -3.0, 0.0, -4.5, 7.3, 6.0, 0.78, 1.0]);
        assert_eq!(
            m.transpose().to_row_major(),
            vec![0.0, 0.0, 6.0, 1.1, -4.5, 0.78, -3.0, 7.3, 1.0]
        );

        let m = Matrix4::from_fn(|i, j| (i * 4 + j) as f32);
        assert_eq!(
            m.transpose().to_row_major(),
            vec![
                0.0, 4.0, 8.0, 12.0, 1.0, 5.0, 9.0, 13.0, 2.0, 6.0, 10.0, 14.0, 3.0, 7.0, 11.0,
                15.0
            ]
        );
    }

    #[test]
    fn test_sum_and_difference() {
        let a = Matrix4::from_fn(|i, j| (i * 4 + j) as f32);
        let negated = a * -1.0;

        assert_eq!((a + Matrix4::zeros()).to_row_major(), a.to_row_major());
        assert_eq!((a + a).to_row_major(), (a * 2.0).to_row_major());
        assert_eq!((a + negated).to_row_major(), Matrix4::zeros().to_row_major());
        assert_eq!((a - a).to_row_major(), Matrix4::zeros().to_row_major());
        assert_eq!((a - negated).to_row_major(), (a * 2.0).to_row_major());
    }

    #[test]
    fn test_scalar_mul() {
        let m = m3([1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0, 0.0]);
        assert_eq!(
            (m * 3.0).to_row_major(),
            vec![3.0, 6.0, 9.0, 12.0, 9.0, 6.0, 3.0, 0.0, 0.0]
        );
        assert_eq!((m * 0.0).to_row_major(), vec![0.0; 9]);

        let m = m3([1.0, 2.0, 3.0, 4.0, 3.0, -2.0, -1.0, 0.0, 0.0]);
        let expected = m3([-0.73, -1.46, -2.19, -2.92, -2.19, 1.46, 0.73, 0.0, 0.0]);
        assert_eq!(m * -0.73, expected);
    }

    #[test]
    fn test_div_scalar() {
        let m = m3([3.0, 6.0, 9.0, 12.0, 9.0, 6.0, 3.0, 0.0, 0.0]);
        assert_eq!(
            m.div_scalar(3.0).unwrap().to_row_major(),
            vec![1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 0.0, 0.0]
        );
        assert_eq!(m.div_scalar(0.0), Err(LinalgError::DivideByZero));

        let m = m4([
            3.0, 6.0, 9.0, 12.0, 9.0, 6.0, -3.0, 0.0, 0.0, 2.0, 3.0, -4.0, 5.0, 1.0, 7.0, 3.0,
        ]);
        let expected = m4([
            -15.0, -30.0, -45.0, -60.0, -45.0, -30.0, 15.0, 0.0, 0.0, -10.0, -15.0, 20.0, -25.0,
            -5.0, -35.0, -15.0,
        ]);
        assert_eq!(m.div_scalar(-0.2).unwrap(), expected);
    }

    #[test]
    fn test_mul_vector() {
        let m = m3([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_abs_diff_eq!(
            m * Vector3::new(0.0, -0.5, 1.7),
            Vector3::new(4.1, 7.7, 11.3),
            epsilon = 1e-5
        );

        let m = Matrix4::from_fn(|i, j| (i * 4 + j) as f32);
        assert_eq!(
            (m * Vector4::new(0.0, 1.0, 2.0, 3.0)).as_array(),
            &[14.0, 38.0, 62.0, 86.0]
        );
        assert_eq!(m * Vector4::zeros(), Vector4::zeros());
    }

    #[test]
    fn test_mul_untyped_vector_checks_dimension() {
        let err = Vector4::from_slice(&[1.0, 2.0, 3.0]).map(|v| Matrix4::identity() * v);
        assert_eq!(
            err,
            Err(LinalgError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_mul_matrix() {
        let a = m3([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let b = m3([9.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(
            (a * b).to_row_major(),
            vec![15.0, 18.0, 21.0, 69.0, 54.0, 66.0, 123.0, 90.0, 111.0]
        );

        let a = Matrix4::from_fn(|i, j| (i * 4 + j + 1) as f32);
        let b = m4([
            0.0, 1.5, 0.0, -3.8, 4.0, 0.0, 6.0, -1.7, 8.0, 9.0, 1.0, 11.0, -12.0, 0.0, 4.0, 0.5,
        ]);
        let expected = m4([
            -16.0, 28.5, 31.0, 27.8, -16.0, 70.5, 75.0, 51.8, -16.0, 112.5, 119.0, 75.8, -16.0,
            154.5, 163.0, 99.8,
        ]);
        assert_abs_diff_eq!(a * b, expected, epsilon = 1e-4);
    }

    #[test]
    fn test_determinant() {
        assert_eq!(
            m3([1.0, -2.0, 3.0, 4.0, 0.0, 6.0, -7.0, 8.0, 9.0]).determinant(),
            204.0
        );
        assert_eq!(
            m3([1.0, 0.0, 3.0, 4.0, 0.0, 6.0, -7.0, 0.0, 9.0]).determinant(),
            0.0
        );
        assert_eq!(
            m4([
                10.0, 0.0, 0.0, 0.0, 0.0, 4.0, 5.0, 2.0, 6.0, 2.0, 3.0, 3.0, 4.0, 1.0, 2.0, 1.0
            ])
            .determinant(),
            -50.0
        );
        assert_eq!(
            m3([2.0, 5.0, 7.0, 6.0, 3.0, 4.0, 5.0, -2.0, -3.0]).determinant(),
            -1.0
        );
    }

    #[test]
    fn test_determinant_matches_nalgebra() {
        let m = m4([
            2.0, -1.0, 0.5, 3.0, 1.0, 4.0, -2.0, 0.0, -3.0, 0.0, 1.0, 2.0, 0.5, 2.0, 2.0, -1.0,
        ]);
        let na: nalgebra::Matrix4<f32> = m.into();
        assert_abs_diff_eq!(m.determinant(), na.determinant(), epsilon = 1e-3);
    }

    #[test]
    fn test_inverse() {
        let m = m3([2.0, 5.0, 7.0, 6.0, 3.0, 4.0, 5.0, -2.0, -3.0]);
        let expected = m3([1.0, -1.0, 1.0, -38.0, 41.0, -34.0, 27.0, -29.0, 24.0]);
        let inverse = m.inverse().unwrap();
        assert_eq!(inverse, expected);
        assert!((m * inverse).is_identity(1e-4));
    }

    #[test]
    fn test_inverse_4x4_matches_nalgebra() {
        let m = m4([
            4.0, 0.0, 1.0, 2.0, 0.0, 3.0, 0.0, 1.0, 1.0, 0.0, 2.0, 0.0, 2.0, 1.0, 0.0, 5.0,
        ]);
        let expected: Matrix4 = nalgebra::Matrix4::from(m).try_inverse().unwrap().into();
        assert_abs_diff_eq!(m.inverse().unwrap(), expected, epsilon = 1e-5);
    }

    #[test]
    fn test_inverse_of_singular_matrix() {
        let m = m3([2.0, 0.0, 7.0, 6.0, 0.0, 4.0, 5.0, 0.0, -3.0]);
        assert_eq!(m.determinant(), 0.0);
        let err = m.inverse().unwrap_err();
        assert_eq!(err, LinalgError::SingularMatrix);
        assert_eq!(err.to_string(), "matrix has no inverse");
        assert_eq!(m.inverse_transpose(), Err(LinalgError::SingularMatrix));
    }

    #[test]
    fn test_inverse_ignores_overall_magnitude() {
        let m = Matrix3::scaled_identity(1e-4);
        assert!((m * m.inverse().unwrap()).is_identity(1e-4));

        let m = Matrix4::from_rows([
            [1.0, 0.0, 0.0, 1000.0],
            [0.0, 1.0, 0.0, -500.0],
            [0.0, 0.0, 1.0, 250.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert!((m * m.inverse().unwrap()).is_identity(1e-4));

        assert_eq!(
            Matrix3::zeros().inverse(),
            Err(LinalgError::SingularMatrix)
        );
    }

    #[test]
    fn test_adjugate_identity() {
        // A · adj(A) = det(A) · I
        let m = m3([1.0, -2.0, 3.0, 4.0, 0.0, 6.0, -7.0, 8.0, 9.0]);
        assert_eq!(m * m.adjugate(), Matrix3::scaled_identity(204.0));
    }

    #[test]
    fn test_solve_unique() {
        let m = m3([3.0, 2.0, -5.0, 2.0, -1.0, 3.0, 1.0, 2.0, -1.0]);
        let x = m.solve(&Vector3::new(-1.0, 13.0, 9.0)).unwrap();
        assert_abs_diff_eq!(x, Vector3::new(3.0, 5.0, 4.0), epsilon = 1e-4);

        let m = m3([2.0, 1.0, -1.0, -3.0, -1.0, 2.0, -2.0, 1.0, 2.0]);
        let x = m.solve(&Vector3::new(8.0, -11.0, -3.0)).unwrap();
        assert_abs_diff_eq!(x, Vector3::new(2.0, 3.0, -1.0), epsilon = 1e-4);
    }

    #[test]
    fn test_solve_infinite_returns_particular_solution() {
        let m = m3([1.0, 1.0, -1.0, 3.0, 2.0, -5.0, 3.0, 1.0, -7.0]);
        let rhs = Vector3::new(4.0, 7.0, 2.0);
        let x = m.solve(&rhs).unwrap();
        assert_abs_diff_eq!(x, Vector3::new(2.0, 3.0, 1.0), epsilon = 1e-4);
        assert_abs_diff_eq!(m * x, rhs, epsilon = 1e-4);

        let m = m4([
            1.0, -1.0, 2.0, -3.0, 1.0, 4.0, -1.0, -2.0, 1.0, -4.0, 3.0, -2.0, 1.0, -8.0, 5.0, -2.0,
        ]);
        let x = m.solve(&Vector4::new(1.0, -2.0, -2.0, -2.0)).unwrap();
        assert_abs_diff_eq!(x, Vector4::new(-8.0, 4.0, 8.0, 1.0), epsilon = 1e-3);
    }

    #[test]
    fn test_solve_inconsistent() {
        let m = m3([0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let err = m.solve(&Vector3::new(8.0, 6.0, 3.0)).unwrap_err();
        assert_eq!(err, LinalgError::NoSolution);
        assert_eq!(err.to_string(), "there are no solutions");

        let m = m3([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(
            m.solve(&Vector3::new(8.0, 0.0, 0.0)),
            Err(LinalgError::NoSolution)
        );
    }

    #[test]
    fn test_solve_small_and_unevenly_scaled_coefficients() {
        let m = Matrix3::from_rows([[1e-3, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let x = m.solve(&Vector3::new(1.0, 1000.0, 1.0)).unwrap();
        assert_abs_diff_eq!(x, Vector3::new(1000.0, 1000.0, 1.0), epsilon = 1e-2);

        let m = Matrix3::scaled_identity(1e-6);
        let x = m.solve(&Vector3::new(2e-6, 3e-6, 4e-6)).unwrap();
        assert_abs_diff_eq!(x, Vector3::new(2.0, 3.0, 4.0), epsilon = 1e-4);
    }

    #[test]
    fn test_solve_small_rank_deficient_system() {
        let m = Matrix3::from_rows([[1e-6, 0.0, 0.0], [1e-6, 0.0, 0.0], [0.0, 0.0, 1e-6]]);
        let x = m.solve(&Vector3::new(1e-6, 1e-6, 3e-6)).unwrap();
        assert_abs_diff_eq!(x, Vector3::new(1.0, 1.0, 3.0), epsilon = 1e-4);

        assert_eq!(
            m.solve(&Vector3::new(1e-6, 2e-6, 0.0)),
            Err(LinalgError::NoSolution)
        );
    }

    #[test]
    fn test_solve_zero_matrix_with_zero_rhs() {
        let x = Matrix3::zeros().solve(&Vector3::zeros()).unwrap();
        assert_eq!(x, Vector3::new(1.0, 1.0, 1.0));
    }
}
