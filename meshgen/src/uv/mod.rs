//! Texture coordinate synthesis
//!
//! Each shape gets its own mapping. The results are written as a separate UV
//! table plus one UV index per triangle corner, so seams can split UVs while
//! positions stay shared.

mod box_sphere;
mod cylinder_cone;
mod planar;
mod sweep;

pub(crate) use box_sphere::{box_tex_coords, sphere_tex_coords};
pub(crate) use cylinder_cone::{cone_tex_coords, cylinder_tex_coords};
pub(crate) use planar::elevation_grid_tex_coords;
pub(crate) use sweep::{CapTriangles, extrusion_tex_coords};
pub use planar::generate_tex_coords_for_indexed_face_set;

use glam::{Vec2, Vec3};
use std::f64::consts::PI;

use crate::types::Mesh;

/// Relative precision used when matching UV entries
const APPROX_PRECISION: f32 = 1.0e-5;

/// UV table under construction, de-duplicating entries by approximate match
///
/// Lookups are a linear scan over the distinct entries.
#[derive(Debug, Default)]
pub struct TexCoordTable {
    coords: Vec<Vec2>,
    indices: Vec<u32>,
}

impl TexCoordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a fixed set of entries (e.g. a shared cap center at index 0)
    pub fn with_entries(coords: Vec<Vec2>) -> Self {
        Self {
            coords,
            indices: Vec::new(),
        }
    }

    /// Index of an existing entry approximately equal to `point`
    pub fn find(&self, point: Vec2) -> Option<usize> {
        self.coords.iter().position(|c| is_approx(*c, point))
    }

    /// Append a corner referring to `point`, reusing a matching entry
    pub fn push(&mut self, point: Vec2) {
        let index = match self.find(point) {
            Some(index) => index,
            None => {
                self.coords.push(point);
                self.coords.len() - 1
            }
        };
        self.indices.push(index as u32);
    }

    /// Append a corner referring to an existing entry
    pub fn push_index(&mut self, index: u32) {
        self.indices.push(index);
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Move the table into `mesh`, replacing any previous UVs
    pub fn apply(self, mesh: &mut Mesh) {
        mesh.tex_coords = self.coords;
        mesh.tex_coord_indices = self.indices;
    }
}

/// Approximate equality relative to the smaller of the two magnitudes
///
/// A zero vector only matches itself.
pub(crate) fn is_approx(a: Vec2, b: Vec2) -> bool {
    let limit = a.length_squared().min(b.length_squared()) * APPROX_PRECISION * APPROX_PRECISION;
    (a - b).length_squared() <= limit
}

/// Longitude of `p` around the Y axis mapped to [0, 1]
pub(crate) fn longitude(p: Vec3) -> f64 {
    ((p.x as f64).atan2(p.z as f64) + PI) / (2.0 * PI)
}

/// Longitudes of a triangle's corners with the seam repaired
///
/// A corner that lands exactly on 0 is moved to 1 when any corner of the same
/// triangle is past the halfway point, so no triangle wraps across the whole
/// texture.
pub(crate) fn seam_longitudes(points: [Vec3; 3]) -> [f64; 3] {
    let mut s = points.map(longitude);
    let over = s.iter().any(|&v| v > 0.5);
    for v in &mut s {
        if *v < 1.0e-6 {
            *v = 0.0;
        }
        if *v > 1.0 {
            *v = 1.0;
        }
        if over && *v == 0.0 {
            *v = 1.0;
        }
    }
    s
}
