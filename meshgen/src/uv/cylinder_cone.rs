//! Cylinder and cone texture coordinates
//!
//! Side faces use the same longitude mapping as the sphere. Caps are mapped
//! radially around a single shared center entry at index 0.

use glam::{Vec2, Vec3};

use super::{TexCoordTable, longitude, seam_longitudes};
use crate::types::Mesh;

fn is_on_axis(p: Vec3) -> bool {
    p.x == 0.0 && p.z == 0.0
}

pub(crate) fn cylinder_tex_coords(mesh: &mut Mesh) {
    let mut table = TexCoordTable::with_entries(vec![Vec2::splat(0.5)]);

    for triangle in &mesh.triangles {
        let points = triangle.map(|i| mesh.vertices[i as usize]);
        let is_cap = points[1].y == points[0].y && points[2].y == points[0].y;

        if !is_cap {
            let s = seam_longitudes(points);
            for (point, s) in points.iter().zip(s) {
                let t = if point.y > 0.0 { 1.0 } else { 0.0 };
                table.push(Vec2::new(s as f32, t));
            }
            continue;
        }

        let is_top = points[0].y > 0.0;
        let center = points.iter().rposition(|p| is_on_axis(*p));
        for (j, point) in points.iter().enumerate() {
            if Some(j) == center {
                table.push_index(0);
                continue;
            }
            let angle = (point.z as f64).atan2(point.x as f64);
            let t = if is_top {
                0.5 - 0.5 * angle.sin()
            } else {
                0.5 + 0.5 * angle.sin()
            };
            table.push(Vec2::new((0.5 + 0.5 * angle.cos()) as f32, t as f32));
        }
    }

    table.apply(mesh);
}

pub(crate) fn cone_tex_coords(mesh: &mut Mesh) {
    let mut table = TexCoordTable::with_entries(vec![Vec2::splat(0.5)]);

    for triangle in &mesh.triangles {
        let points = triangle.map(|i| mesh.vertices[i as usize]);
        let apex = points.iter().rposition(|p| p.y > 0.0);

        if let Some(apex) = apex {
            // Base corners: longitude, with the second one pushed to 1 if it
            // wraps past the seam relative to the first
            let mut s = [0.0f64; 3];
            let mut previous: Option<usize> = None;
            for (j, point) in points.iter().enumerate() {
                if j == apex {
                    continue;
                }
                s[j] = longitude(*point);
                if let Some(pre) = previous
                    && s[pre] > 0.5
                    && s[j] < 1.0e-6
                {
                    s[j] = 1.0;
                }
                previous = Some(j);
            }
            for j in 0..3 {
                let uv = if j == apex {
                    Vec2::new(((s[0] + s[1] + s[2]) / 2.0) as f32, 1.0)
                } else {
                    Vec2::new(s[j] as f32, 0.0)
                };
                table.push(uv);
            }
            continue;
        }

        let center = points.iter().rposition(|p| is_on_axis(*p));
        for (j, point) in points.iter().enumerate() {
            if Some(j) == center {
                table.push_index(0);
                continue;
            }
            let angle = (point.z as f64).atan2(point.x as f64);
            table.push(Vec2::new(
                (0.5 + 0.5 * angle.cos()) as f32,
                (0.5 + 0.5 * angle.sin()) as f32,
            ));
        }
    }

    table.apply(mesh);
}
