//! Extrusion texture coordinates
//!
//! The side wall is parameterized by arc length: s along the cross section,
//! t along the spine. The lists passed in still contain their closing point,
//! so a closed cross section or spine ends at s = 1 or t = 1 instead of
//! wrapping back to 0. Each cap gets its own patch normalized to the cross
//! section's bounding rectangle; the end cap is mirrored in s.

use glam::{DVec2, DVec3, Vec2};
use std::ops::Range;

use crate::types::Mesh;

/// Cap triangles of an extrusion mesh, as ranges into `Mesh::triangles`
#[derive(Debug, Clone, Default)]
pub(crate) struct CapTriangles {
    pub begin: Range<usize>,
    pub end: Range<usize>,
    /// Index of the first vertex of the last station
    pub end_station_offset: u32,
}

/// Cumulative arc length at each point, normalized to [0, 1]
fn normalized_arc_lengths<T: Copy>(points: &[T], distance: impl Fn(T, T) -> f64) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    lengths.push(0.0);
    for pair in points.windows(2) {
        total += distance(pair[0], pair[1]);
        lengths.push(total);
    }
    if total > 0.0 {
        for length in &mut lengths {
            *length /= total;
        }
    }
    lengths
}

pub(crate) fn extrusion_tex_coords(
    mesh: &mut Mesh,
    cross_section: &[DVec2],
    spine: &[DVec3],
    caps: &CapTriangles,
) {
    let s = normalized_arc_lengths(cross_section, |a, b| a.distance(b));
    let t = normalized_arc_lengths(spine, |a, b| a.distance(b));

    let mut tex_coords = Vec::with_capacity(s.len() * t.len() + 2 * s.len());
    for &tv in &t {
        tex_coords.extend(s.iter().map(|&sv| Vec2::new(sv as f32, tv as f32)));
    }

    let width = cross_section.len() as u32;
    let mut indices = Vec::with_capacity(mesh.triangle_count() * 3);
    for i in 0..spine.len().saturating_sub(1) as u32 {
        let upper = i * width;
        let lower = (i + 1) * width;
        for j in 0..width.saturating_sub(1) {
            let jj = j + 1;
            indices.extend([j + upper, j + lower, jj + lower]);
            indices.extend([j + upper, jj + lower, jj + upper]);
        }
    }

    if !caps.begin.is_empty() || !caps.end.is_empty() {
        let (min, max) = cross_section
            .iter()
            .fold((cross_section[0], cross_section[0]), |(min, max), p| {
                (min.min(*p), max.max(*p))
            });
        let size = max - min;
        let size = DVec2::new(
            if size.x > 0.0 { size.x } else { 1.0 },
            if size.y > 0.0 { size.y } else { 1.0 },
        );

        if !caps.begin.is_empty() {
            let offset = tex_coords.len() as u32;
            tex_coords.extend(
                cross_section
                    .iter()
                    .map(|p| ((*p - min) / size).as_vec2()),
            );
            for triangle in &mesh.triangles[caps.begin.clone()] {
                indices.extend(triangle.map(|v| v + offset));
            }
        }

        if !caps.end.is_empty() {
            let offset = tex_coords.len() as u32;
            tex_coords.extend(cross_section.iter().map(|p| {
                DVec2::new((max.x - p.x) / size.x, (p.y - min.y) / size.y).as_vec2()
            }));
            for triangle in &mesh.triangles[caps.end.clone()] {
                indices.extend(triangle.map(|v| v - caps.end_station_offset + offset));
            }
        }
    }

    mesh.tex_coords = tex_coords;
    mesh.tex_coord_indices = indices;
}
