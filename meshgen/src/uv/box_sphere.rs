//! Box and sphere texture coordinates

use glam::Vec2;
use std::f64::consts::PI;

use super::{TexCoordTable, seam_longitudes};
use crate::types::Mesh;

/// Corner UVs of a box, assigned per triangle so every face shows the whole
/// texture upright. Matches the fixed triangle order of `generate_box`.
const BOX_TEX_COORD_INDICES: [u32; 36] = [
    3, 2, 0, //
    0, 1, 3, //
    1, 2, 0, //
    1, 3, 2, //
    3, 2, 0, //
    3, 0, 1, //
    2, 0, 1, //
    2, 1, 3, //
    0, 1, 3, //
    0, 3, 2, //
    2, 1, 3, //
    2, 0, 1, //
];

/// Four shared UV entries indexed by the table above
pub(crate) fn box_tex_coords(mesh: &mut Mesh) {
    mesh.tex_coords = vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 1.0),
        Vec2::new(1.0, 1.0),
    ];
    mesh.tex_coord_indices = BOX_TEX_COORD_INDICES.to_vec();
}

/// Equirectangular mapping: longitude to s, polar angle to t
pub(crate) fn sphere_tex_coords(mesh: &mut Mesh, radius: f64) {
    let mut table = TexCoordTable::new();

    for triangle in &mesh.triangles {
        let points = triangle.map(|i| mesh.vertices[i as usize]);
        let s = seam_longitudes(points);

        for (point, s) in points.iter().zip(s) {
            let w = if radius > 0.0 {
                (point.y as f64 / radius).clamp(-1.0, 1.0)
            } else {
                0.0
            };
            let t = 1.0 - w.acos() / PI;
            table.push(Vec2::new(s as f32, t as f32));
        }
    }

    table.apply(mesh);
}
