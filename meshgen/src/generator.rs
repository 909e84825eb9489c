//! Mesh generator state
//!
//! `MeshGenerator` carries the settings shared by all shapes (division number,
//! normal generation, bounding box update) and the lazily created normal
//! filter. The shape routines themselves are implemented in the
//! `primitives`, `extrusion` and `elevation_grid` modules as further
//! `impl MeshGenerator` blocks.

use tracing::warn;

use crate::config::{DEFAULT_DIVISION_NUMBER, GeneratorConfig};
use crate::error::{GenerateError, Result};
use crate::normals::NormalFilter;
use crate::types::Mesh;

/// Procedural mesh generator
///
/// Each generation call is a pure function of its arguments and the
/// generator's settings, and returns a freshly allocated `Mesh`. Calls take
/// `&mut self` because the normal filter is created on first use and reused
/// afterwards; use one generator per thread.
#[derive(Debug)]
pub struct MeshGenerator {
    division_number: usize,
    normal_generation: bool,
    bounding_box_update: bool,
    normal_filter: Option<NormalFilter>,
}

impl Default for MeshGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MeshGenerator {
    pub const DEFAULT_DIVISION_NUMBER: usize = DEFAULT_DIVISION_NUMBER;

    /// Create a generator with default settings
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator from a configuration
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            division_number: config.effective_division_number(),
            normal_generation: config.normal_generation,
            bounding_box_update: config.bounding_box_update,
            normal_filter: None,
        }
    }

    /// Current settings as a configuration value
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            division_number: self.division_number as i32,
            normal_generation: self.normal_generation,
            bounding_box_update: self.bounding_box_update,
        }
    }

    /// Set the tessellation resolution; negative values reset to the default
    pub fn set_division_number(&mut self, n: i32) {
        self.division_number = usize::try_from(n).unwrap_or(DEFAULT_DIVISION_NUMBER);
    }

    pub fn division_number(&self) -> usize {
        self.division_number
    }

    pub fn set_normal_generation_enabled(&mut self, on: bool) {
        self.normal_generation = on;
    }

    pub fn is_normal_generation_enabled(&self) -> bool {
        self.normal_generation
    }

    pub fn set_bounding_box_update_enabled(&mut self, on: bool) {
        self.bounding_box_update = on;
    }

    pub fn is_bounding_box_update_enabled(&self) -> bool {
        self.bounding_box_update
    }

    /// Generate crease-angle normals for `mesh` if normal generation is enabled
    pub fn generate_normals(&mut self, mesh: &mut Mesh, crease_angle: f64) {
        if self.normal_generation {
            self.normal_filter
                .get_or_insert_with(NormalFilter::new)
                .generate_normals(mesh, crease_angle);
        }
    }

    /// Recompute the bounding box if bounding box update is enabled
    pub(crate) fn update_bounding_box(&self, mesh: &mut Mesh) {
        if self.bounding_box_update {
            mesh.update_bounding_box();
        }
    }
}

/// Reject negative shape parameters
pub(crate) fn check_non_negative(shape: &'static str, name: &'static str, value: f64) -> Result<()> {
    // NaN fails this comparison too
    if value >= 0.0 {
        Ok(())
    } else {
        warn!("generate_{}: {} must be >= 0.0, got {}", shape, name, value);
        Err(GenerateError::NegativeParameter { shape, name, value })
    }
}

pub(crate) fn check_finite(shape: &'static str, name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        warn!("generate_{}: {} must be finite, got {}", shape, name, value);
        Err(GenerateError::NonFiniteParameter { shape, name, value })
    }
}

/// Vertex count of a `stations` x `steps` lattice, if it fits `u32` indices
pub(crate) fn lattice_size(shape: &'static str, stations: usize, steps: usize) -> Result<usize> {
    match stations.checked_mul(steps) {
        Some(count) if stations <= u32::MAX as usize && count <= u32::MAX as usize => Ok(count),
        _ => {
            warn!(
                "generate_{}: {} x {} vertices exceed the u32 index range",
                shape, stations, steps
            );
            Err(GenerateError::TooManyVertices {
                shape,
                stations,
                steps,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_division_number_defaults() {
        let mut generator = MeshGenerator::new();
        assert_eq!(generator.division_number(), 20);

        generator.set_division_number(8);
        assert_eq!(generator.division_number(), 8);

        generator.set_division_number(-1);
        assert_eq!(generator.division_number(), MeshGenerator::DEFAULT_DIVISION_NUMBER);

        generator.set_division_number(0);
        assert_eq!(generator.division_number(), 0);
    }

    #[test]
    fn test_config_round_trip() {
        let config = GeneratorConfig {
            division_number: 6,
            normal_generation: false,
            bounding_box_update: false,
        };
        let generator = MeshGenerator::with_config(config.clone());
        assert_eq!(generator.config(), config);
    }

    #[test]
    fn test_normal_generation_toggle() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Vec3::ZERO);
        mesh.add_vertex(Vec3::X);
        mesh.add_vertex(Vec3::Y);
        mesh.add_triangle(0, 1, 2);

        let mut generator = MeshGenerator::new();
        generator.set_normal_generation_enabled(false);
        generator.generate_normals(&mut mesh, 0.0);
        assert!(!mesh.has_normals());
        assert!(generator.normal_filter.is_none());

        generator.set_normal_generation_enabled(true);
        generator.generate_normals(&mut mesh, 0.0);
        assert_eq!(mesh.normals, vec![Vec3::Z]);
        assert!(generator.normal_filter.is_some());
    }

    #[test]
    fn test_check_non_negative() {
        assert!(check_non_negative("box", "size.x", 0.0).is_ok());
        assert_eq!(
            check_non_negative("box", "size.x", -1.0),
            Err(GenerateError::NegativeParameter {
                shape: "box",
                name: "size.x",
                value: -1.0
            })
        );
        assert!(check_non_negative("box", "size.x", f64::NAN).is_err());
    }

    #[test]
    fn test_lattice_size_limits() {
        assert_eq!(lattice_size("torus", 21, 5), Ok(105));
        assert_eq!(
            lattice_size("torus", usize::MAX, 0),
            Err(GenerateError::TooManyVertices {
                shape: "torus",
                stations: usize::MAX,
                steps: 0,
            })
        );
        assert!(lattice_size("elevation_grid", usize::MAX, 2).is_err());
        assert!(lattice_size("elevation_grid", 1 << 16, 1 << 16).is_err());
        assert!(lattice_size("elevation_grid", 1 << 16, (1 << 16) - 1).is_ok());
    }
}
