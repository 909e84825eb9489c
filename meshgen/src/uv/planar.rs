//! Planar projections (elevation grids and arbitrary meshes)

use glam::Vec2;

use crate::elevation_grid::ElevationGrid;
use crate::types::{BoundingBox, Mesh};

/// Map a zero extent to 1 so projections of flat input stay finite
fn extent_or_one(extent: f32) -> f32 {
    if extent > 0.0 { extent } else { 1.0 }
}

/// Project grid vertices onto the grid's XZ extents
pub(crate) fn elevation_grid_tex_coords(mesh: &mut Mesh, grid: &ElevationGrid) {
    let x_max = extent_or_one((grid.x_spacing * grid.x_dimension.saturating_sub(1) as f64) as f32);
    let z_max = extent_or_one((grid.z_spacing * grid.z_dimension.saturating_sub(1) as f64) as f32);

    mesh.tex_coords = mesh
        .vertices
        .iter()
        .map(|v| Vec2::new(v.x / x_max, v.z / z_max))
        .collect();
    mesh.tex_coord_indices = mesh.corner_indices().collect();
}

/// Texture coordinates for an arbitrary mesh by planar projection
///
/// Projects onto the plane spanned by the two longest bounding box axes. The
/// longest axis maps to s in [0, 1]; t keeps the aspect ratio, so it spans
/// `[0, second / longest]`. UV indices mirror the triangle indices.
pub fn generate_tex_coords_for_indexed_face_set(mesh: &mut Mesh) {
    let Some(bbox) = BoundingBox::from_points(&mesh.vertices) else {
        mesh.tex_coords.clear();
        mesh.tex_coord_indices.clear();
        return;
    };
    let size = bbox.size();

    let (s, t) = if size.x >= size.y {
        if size.x >= size.z {
            (0, if size.y >= size.z { 1 } else { 2 })
        } else {
            (2, 0)
        }
    } else if size.y >= size.z {
        (1, if size.x >= size.z { 0 } else { 2 })
    } else {
        (2, 1)
    };

    let s_size = extent_or_one(size[s]);
    let t_size = extent_or_one(size[t]);
    let ratio = size[t] / s_size;

    mesh.tex_coords = mesh
        .vertices
        .iter()
        .map(|v| {
            Vec2::new(
                (v[s] - bbox.min[s]) / s_size,
                (v[t] - bbox.min[t]) / t_size * ratio,
            )
        })
        .collect();
    mesh.tex_coord_indices = mesh.corner_indices().collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_indexed_face_set_projection() {
        // 4 x 2 rectangle in the XZ plane
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(4.0, 0.0, 0.0));
        mesh.add_vertex(Vec3::new(4.0, 0.0, 2.0));
        mesh.add_vertex(Vec3::new(0.0, 0.0, 2.0));
        mesh.add_triangle(0, 2, 1);
        mesh.add_triangle(0, 3, 2);

        generate_tex_coords_for_indexed_face_set(&mut mesh);

        assert_eq!(mesh.tex_coords.len(), 4);
        assert_eq!(mesh.tex_coord_indices, vec![0, 2, 1, 0, 3, 2]);
        assert_eq!(mesh.tex_coords[1], Vec2::new(1.0, 0.0));
        assert_eq!(mesh.tex_coords[2], Vec2::new(1.0, 0.5));
        assert_eq!(mesh.tex_coords[3], Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_indexed_face_set_empty() {
        let mut mesh = Mesh::new();
        generate_tex_coords_for_indexed_face_set(&mut mesh);
        assert!(!mesh.has_tex_coords());
    }
}
