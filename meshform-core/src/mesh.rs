//! Mesh container handed to the affine pipeline.
use crate::error::{LinalgError, LinalgResult};
use crate::vector::{Vector2, Vector3};

/// A polygon face defined by 1-based indices into the vertex list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    vertex_indices: Vec<usize>,
}

impl Polygon {
    pub fn new(vertex_indices: Vec<usize>) -> Self {
        Self { vertex_indices }
    }

    pub fn vertex_indices(&self) -> &[usize] {
        &self.vertex_indices
    }

    pub fn len(&self) -> usize {
        self.vertex_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_indices.is_empty()
    }
}

/// A 3D mesh: vertex positions, normals, texture coordinates and polygons.
///
/// Polygon indices are expected to reference existing vertices. Nothing in
/// this crate enforces that; it is up to whoever builds the mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub vertices: Vec<Vector3>,
    pub texture_vertices: Vec<Vector2>,
    pub normals: Vec<Vector3>,
    pub polygons: Vec<Polygon>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, normals: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(normals),
            ..Self::default()
        }
    }

    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) {
        self.vertices.push(Vector3::new(x, y, z));
    }

    pub fn add_normal(&mut self, x: f32, y: f32, z: f32) {
        self.normals.push(Vector3::new(x, y, z));
    }

    pub fn add_texture_vertex(&mut self, u: f32, v: f32) {
        self.texture_vertices.push(Vector2::new(u, v));
    }

    pub fn add_polygon(&mut self, vertex_indices: &[usize]) {
        self.polygons.push(Polygon::new(vertex_indices.to_vec()));
    }

    /// Vertex referenced by a 1-based polygon index.
    pub fn vertex(&self, index: usize) -> LinalgResult<Vector3> {
        index
            .checked_sub(1)
            .and_then(|i| self.vertices.get(i))
            .copied()
            .ok_or(LinalgError::IndexOutOfRange {
                index,
                len: self.vertices.len(),
            })
    }

    /// True when every polygon index points at an existing vertex.
    pub fn has_valid_polygons(&self) -> bool {
        self.polygons
            .iter()
            .flat_map(|p| p.vertex_indices())
            .all(|&i| (1..=self.vertices.len()).contains(&i))
    }

    /// Calculate the unit face normal of a polygon from its first three vertices
    pub fn polygon_normal(&self, polygon: usize) -> LinalgResult<Vector3> {
        let face = self
            .polygons
            .get(polygon)
            .ok_or(LinalgError::IndexOutOfRange {
                index: polygon,
                len: self.polygons.len(),
            })?;

        let (a, b, c) = match face.vertex_indices() {
            [a, b, c, ..] => (self.vertex(*a)?, self.vertex(*b)?, self.vertex(*c)?),
            other => {
                return Err(LinalgError::DimensionMismatch {
                    expected: 3,
                    actual: other.len(),
                })
            }
        };

        let edge1 = b - a;
        let edge2 = c - a;

        edge1.cross(&edge2).normalize()
    }

    /// Create an axis-aligned cube centred on the origin.
    ///
    /// Eight vertices, six outward quads wound counter-clockwise, one normal
    /// per face and the four corners of a unit texture square.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(8, 6);

        mesh.add_vertex(-half, -half, -half);
        mesh.add_vertex(-half, -half, half);
        mesh.add_vertex(half, -half, half);
        mesh.add_vertex(half, -half, -half);
        mesh.add_vertex(-half, half, -half);
        mesh.add_vertex(-half, half, half);
        mesh.add_vertex(half, half, half);
        mesh.add_vertex(half, half, -half);

        mesh.add_texture_vertex(0.0, 0.0);
        mesh.add_texture_vertex(1.0, 0.0);
        mesh.add_texture_vertex(1.0, 1.0);
        mesh.add_texture_vertex(0.0, 1.0);

        // Bottom, top, left, front, right, back
        mesh.add_polygon(&[1, 4, 3, 2]);
        mesh.add_polygon(&[5, 6, 7, 8]);
        mesh.add_polygon(&[1, 2, 6, 5]);
        mesh.add_polygon(&[2, 3, 7, 6]);
        mesh.add_polygon(&[3, 4, 8, 7]);
        mesh.add_polygon(&[1, 5, 8, 4]);

        mesh.add_normal(0.0, -1.0, 0.0);
        mesh.add_normal(0.0, 1.0, 0.0);
        mesh.add_normal(-1.0, 0.0, 0.0);
        mesh.add_normal(0.0, 0.0, 1.0);
        mesh.add_normal(1.0, 0.0, 0.0);
        mesh.add_normal(0.0, 0.0, -1.0);

        mesh
    }
}
