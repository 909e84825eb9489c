//! Extrusion: sweeping a 2D cross section along a 3D spine
//!
//! Follows the usual interchange-format semantics. The cross section lives in
//! the local XZ plane and is scaled and rotated per spine station, then placed
//! with the station's frame (see [`frame`]). If the first and last point of
//! the spine or the cross section coincide, that list is treated as closed and
//! the duplicate point is dropped. Open spines can be capped at either end.

mod frame;

use glam::{DMat3, DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, warn};

use crate::error::{GenerateError, Result};
use crate::generator::MeshGenerator;
use crate::triangulate::triangulate;
use crate::types::{LineSet, Mesh};
use crate::uv::{self, CapTriangles};

/// Rotation given as an axis and an angle in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisAngle {
    pub axis: DVec3,
    pub angle: f64,
}

impl Default for AxisAngle {
    fn default() -> Self {
        Self {
            axis: DVec3::Z,
            angle: 0.0,
        }
    }
}

impl AxisAngle {
    pub fn new(axis: DVec3, angle: f64) -> Self {
        Self { axis, angle }
    }

    /// Rotation matrix; a zero axis gives the identity
    pub fn to_mat3(&self) -> DMat3 {
        match self.axis.try_normalize() {
            Some(axis) => DMat3::from_axis_angle(axis, self.angle),
            None => DMat3::IDENTITY,
        }
    }
}

/// Extrusion input
///
/// `scale` and `orientation` hold one entry per spine station. A single entry
/// applies to every station, and a shorter list reuses its last entry for the
/// remaining stations. Empty lists mean no scaling and no rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extrusion {
    pub spine: Vec<DVec3>,
    pub cross_section: Vec<DVec2>,
    pub scale: Vec<DVec2>,
    pub orientation: Vec<AxisAngle>,
    pub begin_cap: bool,
    pub end_cap: bool,
    /// Crease angle in radians
    pub crease_angle: f64,
}

impl Default for Extrusion {
    /// Unit-height box: a 2 x 2 square swept from the origin to +Y
    fn default() -> Self {
        Self {
            spine: vec![DVec3::ZERO, DVec3::Y],
            cross_section: vec![
                DVec2::new(1.0, 1.0),
                DVec2::new(1.0, -1.0),
                DVec2::new(-1.0, -1.0),
                DVec2::new(-1.0, 1.0),
                DVec2::new(1.0, 1.0),
            ],
            scale: vec![DVec2::ONE],
            orientation: vec![AxisAngle::default()],
            begin_cap: true,
            end_cap: true,
            crease_angle: 0.0,
        }
    }
}

/// Number of points once a closing duplicate is removed, and whether there was one
fn effective_len<T: PartialEq>(points: &[T]) -> (usize, bool) {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first == last => (points.len() - 1, true),
        _ => (points.len(), false),
    }
}

fn require_points(what: &'static str, count: usize, minimum: usize) -> Result<()> {
    if count < minimum {
        warn!("generate_extrusion: {} needs at least {} points, got {}", what, minimum, count);
        return Err(GenerateError::InsufficientPoints {
            what,
            count,
            minimum,
        });
    }
    Ok(())
}

/// Entry for station `i`, falling back to the last entry
fn per_station<T: Copy>(values: &[T], i: usize) -> Option<T> {
    values.get(i).or(values.last()).copied()
}

/// Triangulate the cross section ring starting at `first_vertex`
fn add_cap(mesh: &mut Mesh, first_vertex: u32, ring_size: u32, reversed: bool) -> Range<usize> {
    let start = mesh.triangle_count();
    let polygon: Vec<u32> = (first_vertex..first_vertex + ring_size).collect();
    for [a, b, c] in triangulate(&mesh.vertices, &polygon) {
        if reversed {
            mesh.add_triangle(polygon[a], polygon[c], polygon[b]);
        } else {
            mesh.add_triangle(polygon[a], polygon[b], polygon[c]);
        }
    }
    start..mesh.triangle_count()
}

impl MeshGenerator {
    /// Sweep `extrusion.cross_section` along `extrusion.spine`
    ///
    /// Fails if the spine or the cross section has fewer than 2 points, before
    /// or after dropping a closing duplicate.
    pub fn generate_extrusion(&mut self, extrusion: &Extrusion, with_uv: bool) -> Result<Mesh> {
        require_points("spine", extrusion.spine.len(), 2)?;
        require_points("cross section", extrusion.cross_section.len(), 2)?;

        let (spine_size, spine_closed) = effective_len(&extrusion.spine);
        let (section_size, section_closed) = effective_len(&extrusion.cross_section);

        require_points("spine", spine_size, 2)?;
        require_points("cross section", section_size, 2)?;

        let spine = &extrusion.spine[..spine_size];
        let section = &extrusion.cross_section[..section_size];
        let frames = frame::spine_frames(spine, spine_closed);

        let mut mesh = Mesh::with_capacity(spine_size * section_size, spine_size * section_size * 2);

        for (i, (station, frame)) in spine.iter().zip(&frames).enumerate() {
            let scale = per_station(&extrusion.scale, i).unwrap_or(DVec2::ONE);
            let orientation = per_station(&extrusion.orientation, i)
                .map(|o| o.to_mat3())
                .unwrap_or(DMat3::IDENTITY);
            let rotation = *frame * orientation;

            for point in section {
                let local = DVec3::new(point.x * scale.x, 0.0, point.y * scale.y);
                mesh.add_vertex((rotation * local + *station).as_vec3());
            }
        }

        let width = section_size as u32;
        let stations = spine_size as u32;
        let spine_segments = if spine_closed { stations } else { stations - 1 };
        let section_segments = if section_closed { width } else { width - 1 };

        for i in 0..spine_segments {
            let upper = i * width;
            let lower = ((i + 1) % stations) * width;
            for j in 0..section_segments {
                let jj = (j + 1) % width;
                mesh.add_triangle(j + upper, j + lower, jj + lower);
                mesh.add_triangle(j + upper, jj + lower, jj + upper);
            }
        }

        let end_station_offset = width * (stations - 1);
        let mut caps = CapTriangles {
            end_station_offset,
            ..CapTriangles::default()
        };
        if !spine_closed {
            if extrusion.begin_cap {
                caps.begin = add_cap(&mut mesh, 0, width, false);
            }
            if extrusion.end_cap {
                caps.end = add_cap(&mut mesh, end_station_offset, width, true);
            }
        }

        debug!(
            "generate_extrusion: {} stations x {} points (spine closed: {}, cross section closed: {}), {} triangles",
            spine_size,
            section_size,
            spine_closed,
            section_closed,
            mesh.triangle_count()
        );

        self.update_bounding_box(&mut mesh);
        self.generate_normals(&mut mesh, extrusion.crease_angle);

        if with_uv {
            uv::extrusion_tex_coords(&mut mesh, &extrusion.cross_section, &extrusion.spine, &caps);
        }

        Ok(mesh)
    }

    /// Wireframe of an extrusion: one ring per spine station plus the lines
    /// joining corresponding points of neighbouring stations
    ///
    /// `mesh` must be the result of `generate_extrusion` for the same input;
    /// the line set shares its vertices. Needs at least 4 cross section
    /// points and 2 spine points. A closed spine links its last station back
    /// to the first.
    pub fn generate_extrusion_line_set(&self, extrusion: &Extrusion, mesh: &Mesh) -> Result<LineSet> {
        require_points("cross section", extrusion.cross_section.len(), 4)?;
        require_points("spine", extrusion.spine.len(), 2)?;

        let (stations, spine_closed) = effective_len(&extrusion.spine);
        let (width, _) = effective_len(&extrusion.cross_section);

        let needed = stations * width;
        if mesh.vertex_count() < needed {
            warn!(
                "generate_extrusion_line_set: mesh has {} vertices, extrusion needs {}",
                mesh.vertex_count(),
                needed
            );
            return Err(GenerateError::InsufficientPoints {
                what: "extrusion mesh",
                count: mesh.vertex_count(),
                minimum: needed,
            });
        }

        let mut line_set = LineSet {
            vertices: mesh.vertices.clone(),
            lines: Vec::with_capacity(needed * 2),
        };

        let stations = stations as u32;
        let width = width as u32;
        let linked = if spine_closed { stations } else { stations - 1 };

        for i in 0..stations {
            let ring = i * width;
            let next_ring = ((i + 1) % stations) * width;
            for j in 0..width {
                line_set.add_line(ring + j, ring + (j + 1) % width);
                if i < linked {
                    line_set.add_line(ring + j, next_ring + j);
                }
            }
        }

        Ok(line_set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_default_extrusion_is_a_capped_box() {
        let mut generator = MeshGenerator::new();
        let mesh = generator.generate_extrusion(&Extrusion::default(), false).unwrap();

        assert_eq!(mesh.vertex_count(), 8);
        // 4 side quads and 2 triangles per cap
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.vertices[0], Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(mesh.vertices[4], Vec3::new(1.0, 1.0, 1.0));

        let bbox = mesh.bounding_box.unwrap();
        assert_eq!(bbox.min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(bbox.max, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_closed_spine_has_no_caps() {
        let extrusion = Extrusion {
            spine: vec![
                DVec3::ZERO,
                DVec3::new(4.0, 0.0, 0.0),
                DVec3::new(4.0, 0.0, 4.0),
                DVec3::new(0.0, 0.0, 4.0),
                DVec3::ZERO,
            ],
            ..Extrusion::default()
        };
        let mut generator = MeshGenerator::new();
        let mesh = generator.generate_extrusion(&extrusion, false).unwrap();

        assert_eq!(mesh.vertex_count(), 4 * 4);
        // Every station pair including the wrap, 4 quads each
        assert_eq!(mesh.triangle_count(), 4 * 4 * 2);
        assert!(mesh.triangles.iter().flatten().all(|&i| i < 16));
    }

    #[test]
    fn test_open_cross_section_is_not_wrapped() {
        let extrusion = Extrusion {
            cross_section: vec![DVec2::new(-1.0, 0.0), DVec2::ZERO, DVec2::new(1.0, 0.0)],
            begin_cap: false,
            end_cap: false,
            ..Extrusion::default()
        };
        let mut generator = MeshGenerator::new();
        let mesh = generator.generate_extrusion(&extrusion, false).unwrap();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_insufficient_points() {
        let mut generator = MeshGenerator::new();

        let extrusion = Extrusion {
            spine: vec![DVec3::ZERO],
            ..Extrusion::default()
        };
        assert_eq!(
            generator.generate_extrusion(&extrusion, false),
            Err(GenerateError::InsufficientPoints {
                what: "spine",
                count: 1,
                minimum: 2
            })
        );

        // Two identical points collapse to one
        let extrusion = Extrusion {
            cross_section: vec![DVec2::ONE, DVec2::ONE],
            ..Extrusion::default()
        };
        assert_eq!(
            generator.generate_extrusion(&extrusion, false),
            Err(GenerateError::InsufficientPoints {
                what: "cross section",
                count: 1,
                minimum: 2
            })
        );
    }

    #[test]
    fn test_scale_and_orientation() {
        let mut generator = MeshGenerator::new();

        let scaled = Extrusion {
            scale: vec![DVec2::new(2.0, 3.0)],
            ..Extrusion::default()
        };
        let mesh = generator.generate_extrusion(&scaled, false).unwrap();
        assert_eq!(mesh.vertices[0], Vec3::new(2.0, 0.0, 3.0));
        assert_eq!(mesh.vertices[4], Vec3::new(2.0, 1.0, 3.0));

        // Shorter list: the second station reuses the last entry
        let tapered = Extrusion {
            scale: vec![DVec2::ONE, DVec2::splat(0.5)],
            spine: vec![DVec3::ZERO, DVec3::Y, DVec3::Y * 2.0],
            ..Extrusion::default()
        };
        let mesh = generator.generate_extrusion(&tapered, false).unwrap();
        assert_eq!(mesh.vertices[8], Vec3::new(0.5, 2.0, 0.5));

        let rotated = Extrusion {
            orientation: vec![AxisAngle::new(DVec3::Y, FRAC_PI_2)],
            ..Extrusion::default()
        };
        let mesh = generator.generate_extrusion(&rotated, false).unwrap();
        assert!(mesh.vertices[0].abs_diff_eq(Vec3::new(1.0, 0.0, -1.0), 1e-6));
    }

    #[test]
    fn test_tex_coords_cover_sides_and_caps() {
        let mut generator = MeshGenerator::new();
        let mesh = generator.generate_extrusion(&Extrusion::default(), true).unwrap();

        // 5 x 2 side entries (closing point kept) plus 5 per cap
        assert_eq!(mesh.tex_coords.len(), 5 * 2 + 5 + 5);
        assert_eq!(mesh.tex_coord_indices.len(), mesh.triangle_count() * 3);
        assert!(mesh
            .tex_coord_indices
            .iter()
            .all(|&i| (i as usize) < mesh.tex_coords.len()));
        assert_eq!(mesh.tex_coords[4], glam::Vec2::new(1.0, 0.0));
        assert_eq!(mesh.tex_coords[9], glam::Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_cap_tex_coords_use_cross_section_bounds() {
        // Cross section far from the origin on Z
        let extrusion = Extrusion {
            cross_section: vec![
                DVec2::new(0.0, 5.0),
                DVec2::new(1.0, 5.0),
                DVec2::new(1.0, 6.0),
                DVec2::new(0.0, 6.0),
                DVec2::new(0.0, 5.0),
            ],
            ..Extrusion::default()
        };
        let mut generator = MeshGenerator::new();
        let mesh = generator.generate_extrusion(&extrusion, true).unwrap();

        for uv in &mesh.tex_coords {
            assert!((0.0..=1.0).contains(&uv.x), "{uv:?}");
            assert!((0.0..=1.0).contains(&uv.y), "{uv:?}");
        }
    }

    #[test]
    fn test_line_set() {
        let extrusion = Extrusion::default();
        let mut generator = MeshGenerator::new();
        let mesh = generator.generate_extrusion(&extrusion, false).unwrap();
        let lines = generator
            .generate_extrusion_line_set(&extrusion, &mesh)
            .unwrap();

        // Two rings of 4 plus 4 longitudinal lines
        assert_eq!(lines.line_count(), 12);
        assert_eq!(lines.vertices.len(), 8);
        assert!(lines.lines.contains(&[0, 4]));
        assert!(lines.lines.contains(&[3, 0]));
    }

    #[test]
    fn test_line_set_closed_spine_wraps() {
        let extrusion = Extrusion {
            spine: vec![
                DVec3::ZERO,
                DVec3::new(4.0, 0.0, 0.0),
                DVec3::new(4.0, 0.0, 4.0),
                DVec3::ZERO,
            ],
            ..Extrusion::default()
        };
        let mut generator = MeshGenerator::new();
        let mesh = generator.generate_extrusion(&extrusion, false).unwrap();
        let lines = generator.generate_extrusion_line_set(&extrusion, &mesh).unwrap();

        assert_eq!(lines.line_count(), 3 * 4 * 2);
        assert!(lines.lines.iter().flatten().all(|&i| i < 12));
        assert!(lines.lines.contains(&[8, 0]));
    }

    #[test]
    fn test_line_set_rejects_small_cross_section() {
        let extrusion = Extrusion {
            cross_section: vec![DVec2::ZERO, DVec2::X, DVec2::Y],
            ..Extrusion::default()
        };
        let generator = MeshGenerator::new();
        assert!(
            generator
                .generate_extrusion_line_set(&extrusion, &Mesh::new())
                .is_err()
        );
    }

    #[test]
    fn test_deserialize_from_toml() {
        let extrusion: Extrusion = toml::from_str(
            r#"
            spine = [[0.0, 0.0, 0.0], [0.0, 2.0, 0.0]]
            crease_angle = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(extrusion.spine[1], DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(extrusion.cross_section.len(), 5);
        assert!(extrusion.begin_cap && extrusion.end_cap);
        assert_eq!(extrusion.crease_angle, 0.5);
    }
}
