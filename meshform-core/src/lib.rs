//! meshform core library - linear algebra kernel and affine mesh transforms
//!
//! Fixed-size vectors and square matrices with determinant, inverse and a
//! Gaussian-elimination solver, plus the pipeline that scales, rotates and
//! translates the vertices and normals of a [`Mesh`].
//!
//! ```
//! use meshform_core::{model_transform, Mesh, TransformParams, Vector3};
//!
//! let cube = Mesh::cube(2.0);
//! let params = TransformParams::translation(Vector3::new(1.0, 0.0, 0.0));
//! let moved = model_transform(&cube, &params);
//! assert_eq!(moved.vertices[0], Vector3::new(0.0, -1.0, -1.0));
//! ```

pub mod affine;
pub mod error;
pub mod matrix;
pub mod mesh;
pub mod vector;

// Re-export commonly used types
pub use affine::{
    model_transform, transform_normal, transform_vertex, try_transform_normal, AffineTransform,
    TransformParams, NO_ROTATION,
};
pub use error::{LinalgError, LinalgResult};
pub use matrix::{Matrix, Matrix3, Matrix4};
pub use mesh::{Mesh, Polygon};
pub use vector::{Vector, Vector2, Vector3, Vector4};
