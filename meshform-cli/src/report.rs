//! Plain-text report of a mesh before and after transformation
use std::io::{self, Write};

use meshform_core::{Mesh, TransformParams};

/// Write the transform parameters followed by every vertex and normal,
/// original on the left and transformed on the right.
pub fn write_report<W: Write>(
    out: &mut W,
    params: &TransformParams,
    original: &Mesh,
    transformed: &Mesh,
) -> io::Result<()> {
    writeln!(out, "scaling     {}", params.scaling)?;
    writeln!(out, "rotation    {}", params.rotation)?;
    writeln!(out, "translation {}", params.translation)?;
    writeln!(out)?;

    writeln!(out, "vertices ({})", transformed.vertices.len())?;
    for (i, (before, after)) in original.vertices.iter().zip(&transformed.vertices).enumerate() {
        writeln!(out, "  v{:<3} {before} -> {after}", i + 1)?;
    }

    writeln!(out, "normals ({})", transformed.normals.len())?;
    for (i, (before, after)) in original.normals.iter().zip(&transformed.normals).enumerate() {
        writeln!(out, "  vn{:<2} {before} -> {after}", i + 1)?;
    }

    writeln!(
        out,
        "polygons: {}, texture vertices: {}",
        transformed.polygons.len(),
        transformed.texture_vertices.len()
    )
}
