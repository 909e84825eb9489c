//! Wavefront OBJ export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::types::Mesh;

/// Write `mesh` as a Wavefront OBJ object named `name`
///
/// Normals and texture coordinates are written with their own index streams,
/// so faces use the `f v/vt/vn` form (or `v//vn`, `v/vt`, `v` when an
/// attribute is missing).
pub fn write_obj<W: Write>(mesh: &Mesh, out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "# meshgen")?;
    writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    writeln!(out, "o {}", name)?;

    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }

    let with_tex_coords =
        mesh.has_tex_coords() && mesh.tex_coord_indices.len() == mesh.triangle_count() * 3;
    let with_normals = mesh.has_normals() && mesh.normal_indices.len() == mesh.triangle_count() * 3;

    if with_tex_coords {
        for uv in &mesh.tex_coords {
            writeln!(out, "vt {} {}", uv.x, uv.y)?;
        }
    }
    if with_normals {
        for n in &mesh.normals {
            writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
        }
    }

    // OBJ indices are 1-based
    for (i, triangle) in mesh.triangles.iter().enumerate() {
        write!(out, "f")?;
        for (corner, v) in triangle.iter().enumerate() {
            let k = i * 3 + corner;
            match (with_tex_coords, with_normals) {
                (true, true) => write!(
                    out,
                    " {}/{}/{}",
                    v + 1,
                    mesh.tex_coord_indices[k] + 1,
                    mesh.normal_indices[k] + 1
                )?,
                (true, false) => write!(out, " {}/{}", v + 1, mesh.tex_coord_indices[k] + 1)?,
                (false, true) => write!(out, " {}//{}", v + 1, mesh.normal_indices[k] + 1)?,
                (false, false) => write!(out, " {}", v + 1)?,
            }
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Write `mesh` to an OBJ file at `path`
pub fn save_obj(mesh: &Mesh, path: &Path, name: &str) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut out, name)?;
    out.flush()
}
