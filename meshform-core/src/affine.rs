//! Affine transformation pipeline: scale, rotate and translate mesh geometry.
//!
//! Positions are multiplied by each stage matrix directly. Normals are
//! multiplied by the inverse-transpose of each stage matrix, which keeps them
//! perpendicular to their surface under non-uniform scaling. Both paths run
//! in the same fixed order: scale, rotate about x then y then z, translate.
//!
//! Mesh transformation never fails. When a normal stage matrix has no
//! inverse the normal is carried over untransformed.

use log::{debug, trace};

use crate::error::LinalgResult;
use crate::matrix::{Matrix3, Matrix4};
use crate::mesh::Mesh;
use crate::vector::Vector3;

/// Rotation parameters that mean "do not rotate".
pub const NO_ROTATION: Vector3 = Vector3::new(1.0, 1.0, 1.0);

const SNAP_EPSILON: f32 = 1e-9;

/// Scaling factors, rotation angles (degrees) and translation offsets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransformParams {
    pub scaling: Vector3,
    pub rotation: Vector3,
    pub translation: Vector3,
}

impl TransformParams {
    pub fn new(scaling: Vector3, rotation: Vector3, translation: Vector3) -> Self {
        Self {
            scaling,
            rotation,
            translation,
        }
    }

    pub fn scaling(scaling: Vector3) -> Self {
        Self {
            scaling,
            ..Self::default()
        }
    }

    pub fn rotation(rotation: Vector3) -> Self {
        Self {
            rotation,
            ..Self::default()
        }
    }

    pub fn translation(translation: Vector3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            scaling: Vector3::new(1.0, 1.0, 1.0),
            rotation: NO_ROTATION,
            translation: Vector3::zeros(),
        }
    }
}

/// Snap values within `1e-9` of 0 or ±1 onto them.
pub fn snap_unit(value: f32) -> f32 {
    if value.abs() < SNAP_EPSILON {
        0.0
    } else if (1.0 - value.abs()).abs() < SNAP_EPSILON {
        value.signum()
    } else {
        value
    }
}

/// Create a diagonal scaling matrix
pub fn scaling_matrix(scaling: &Vector3) -> Matrix3 {
    Matrix3::from_rows([
        [scaling.x(), 0.0, 0.0],
        [0.0, scaling.y(), 0.0],
        [0.0, 0.0, scaling.z()],
    ])
}

/// Create the x, y and z axis rotation matrices for angles in degrees.
///
/// The parameters (1, 1, 1) are the [`NO_ROTATION`] sentinel and produce
/// three identity matrices without evaluating any trigonometry.
pub fn rotation_matrices(rotation: &Vector3) -> [Matrix3; 3] {
    if *rotation == NO_ROTATION {
        return [Matrix3::identity(); 3];
    }

    let (cos_x, sin_x) = axis_trig(rotation.x());
    let (cos_y, sin_y) = axis_trig(rotation.y());
    let (cos_z, sin_z) = axis_trig(rotation.z());

    #[rustfmt::skip]
    let matrices = [
        Matrix3::from_rows([
            [1.0,   0.0,    0.0],
            [0.0, cos_x, -sin_x],
            [0.0, sin_x,  cos_x],
        ]),
        Matrix3::from_rows([
            [ cos_y, 0.0, sin_y],
            [   0.0, 1.0,   0.0],
            [-sin_y, 0.0, cos_y],
        ]),
        Matrix3::from_rows([
            [cos_z, -sin_z, 0.0],
            [sin_z,  cos_z, 0.0],
            [  0.0,    0.0, 1.0],
        ]),
    ];
    matrices
}

/// Create a homogeneous translation matrix
pub fn translation_matrix(translation: &Vector3) -> Matrix4 {
    #[rustfmt::skip]
    let matrix = Matrix4::from_rows([
        [1.0, 0.0, 0.0, translation.x()],
        [0.0, 1.0, 0.0, translation.y()],
        [0.0, 0.0, 1.0, translation.z()],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    matrix
}

fn axis_trig(degrees: f32) -> (f32, f32) {
    let radians = f64::from(degrees).to_radians();
    (
        snap_unit(radians.cos() as f32),
        snap_unit(radians.sin() as f32),
    )
}

pub fn scale_vertex(vertex: &Vector3, scaling: &Vector3) -> Vector3 {
    scaling_matrix(scaling) * *vertex
}

pub fn rotate_vertex(vertex: &Vector3, rotation: &Vector3) -> Vector3 {
    apply_rotations(&rotation_matrices(rotation), vertex)
}

pub fn translate_vertex(vertex: &Vector3, translation: &Vector3) -> Vector3 {
    (translation_matrix(translation) * vertex.to_homogeneous()).truncate()
}

/// Scale a normal by the inverse-transpose of the scaling matrix.
///
/// A zero scale factor leaves the normal untouched.
pub fn scale_normal(normal: &Vector3, scaling: &Vector3) -> Vector3 {
    let result = scaling_matrix(scaling)
        .inverse_transpose()
        .map(|m| m * *normal);
    or_original(result, normal, "scaling")
}

pub fn rotate_normal(normal: &Vector3, rotation: &Vector3) -> Vector3 {
    let result = inverse_transposes(&rotation_matrices(rotation))
        .map(|matrices| apply_rotations(&matrices, normal));
    or_original(result, normal, "rotation")
}

pub fn translate_normal(normal: &Vector3, translation: &Vector3) -> Vector3 {
    let result = translation_matrix(translation)
        .inverse_transpose()
        .map(|m| (m * normal.to_homogeneous()).truncate());
    or_original(result, normal, "translation")
}

fn apply_rotations(matrices: &[Matrix3; 3], v: &Vector3) -> Vector3 {
    matrices.iter().fold(*v, |acc, m| *m * acc)
}

fn inverse_transposes(matrices: &[Matrix3; 3]) -> LinalgResult<[Matrix3; 3]> {
    let [x, y, z] = matrices;
    Ok([
        x.inverse_transpose()?,
        y.inverse_transpose()?,
        z.inverse_transpose()?,
    ])
}

fn or_original(result: LinalgResult<Vector3>, original: &Vector3, stage: &str) -> Vector3 {
    result.unwrap_or_else(|err| {
        debug!("{stage} left normal {original} untransformed: {err}");
        *original
    })
}

/// Inverse-transposed stage matrices used on normals.
#[derive(Debug, Clone, Copy)]
struct NormalStages {
    scaling: Matrix3,
    rotations: [Matrix3; 3],
    translation: Matrix4,
}

impl NormalStages {
    fn new(scaling: &Matrix3, rotations: &[Matrix3; 3], translation: &Matrix4) -> LinalgResult<Self> {
        Ok(Self {
            scaling: scaling.inverse_transpose()?,
            rotations: inverse_transposes(rotations)?,
            translation: translation.inverse_transpose()?,
        })
    }
}

/// Stage matrices built once from a set of [`TransformParams`].
#[derive(Debug, Clone, Copy)]
pub struct AffineTransform {
    scaling: Matrix3,
    rotations: [Matrix3; 3],
    translation: Matrix4,
    normal_stages: LinalgResult<NormalStages>,
}

impl AffineTransform {
    pub fn new(params: &TransformParams) -> Self {
        let scaling = scaling_matrix(&params.scaling);
        let rotations = rotation_matrices(&params.rotation);
        let translation = translation_matrix(&params.translation);

        let normal_stages = NormalStages::new(&scaling, &rotations, &translation);

        Self {
            scaling,
            rotations,
            translation,
            normal_stages,
        }
    }

    pub fn scaling_matrix(&self) -> &Matrix3 {
        &self.scaling
    }

    pub fn rotation_matrices(&self) -> &[Matrix3; 3] {
        &self.rotations
    }

    pub fn translation_matrix(&self) -> &Matrix4 {
        &self.translation
    }

    /// Scale, rotate (x, y, z) and translate a vertex position.
    pub fn apply_to_vertex(&self, vertex: &Vector3) -> Vector3 {
        let scaled = self.scaling * *vertex;
        let rotated = apply_rotations(&self.rotations, &scaled);
        (self.translation * rotated.to_homogeneous()).truncate()
    }

    /// Run a normal through the inverse-transposed stages, surfacing any
    /// kernel error.
    pub fn try_apply_to_normal(&self, normal: &Vector3) -> LinalgResult<Vector3> {
        let stages = self.normal_stages?;
        let scaled = stages.scaling * *normal;
        let rotated = apply_rotations(&stages.rotations, &scaled);
        Ok((stages.translation * rotated.to_homogeneous()).truncate())
    }

    /// Like [`try_apply_to_normal`](Self::try_apply_to_normal) but returns the
    /// original normal when any stage fails.
    pub fn apply_to_normal(&self, normal: &Vector3) -> Vector3 {
        or_original(self.try_apply_to_normal(normal), normal, "transform")
    }

    /// Build a new mesh with transformed vertices and normals.
    ///
    /// Texture coordinates and polygons are copied unchanged.
    pub fn apply_to_mesh(&self, mesh: &Mesh) -> Mesh {
        let mut result = Mesh::with_capacity(mesh.vertices.len(), mesh.normals.len());

        for vertex in &mesh.vertices {
            let v = self.apply_to_vertex(vertex);
            result.add_vertex(v.x(), v.y(), v.z());
        }

        if let Err(err) = self.normal_stages {
            debug!(
                "{} normals left untransformed: {err}",
                mesh.normals.len()
            );
        }
        for normal in &mesh.normals {
            let n = self.apply_to_normal(normal);
            result.add_normal(n.x(), n.y(), n.z());
        }

        result.texture_vertices = mesh.texture_vertices.clone();
        result.polygons = mesh.polygons.clone();

        trace!(
            "transformed mesh: {} vertices, {} normals, {} polygons",
            result.vertices.len(),
            result.normals.len(),
            result.polygons.len()
        );
        result
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::new(&TransformParams::default())
    }
}

pub fn transform_vertex(vertex: &Vector3, params: &TransformParams) -> Vector3 {
    AffineTransform::new(params).apply_to_vertex(vertex)
}

pub fn try_transform_normal(normal: &Vector3, params: &TransformParams) -> LinalgResult<Vector3> {
    AffineTransform::new(params).try_apply_to_normal(normal)
}

pub fn transform_normal(normal: &Vector3, params: &TransformParams) -> Vector3 {
    AffineTransform::new(params).apply_to_normal(normal)
}

/// Apply `params` to every vertex and normal of `mesh`, returning a new mesh.
pub fn model_transform(mesh: &Mesh, params: &TransformParams) -> Mesh {
    AffineTransform::new(params).apply_to_mesh(mesh)
}
