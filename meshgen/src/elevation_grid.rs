//! Height field tessellation

use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{GenerateError, Result};
use crate::generator::{MeshGenerator, lattice_size};
use crate::types::Mesh;
use crate::uv;

/// Regular height field in the XZ plane
///
/// `height` is row-major: the sample at column `x` of row `z` is
/// `height[z * x_dimension + x]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationGrid {
    pub x_dimension: usize,
    pub z_dimension: usize,
    pub x_spacing: f64,
    pub z_spacing: f64,
    pub height: Vec<f64>,
    /// Wind triangles so they face +Y (for a flat grid)
    pub ccw: bool,
    /// Crease angle in radians
    pub crease_angle: f64,
}

impl Default for ElevationGrid {
    fn default() -> Self {
        Self {
            x_dimension: 0,
            z_dimension: 0,
            x_spacing: 1.0,
            z_spacing: 1.0,
            height: Vec::new(),
            ccw: true,
            crease_angle: 0.0,
        }
    }
}

impl ElevationGrid {
    /// Flat grid of the given dimensions with unit spacing
    pub fn flat(x_dimension: usize, z_dimension: usize) -> Self {
        Self {
            x_dimension,
            z_dimension,
            height: vec![0.0; x_dimension * z_dimension],
            ..Self::default()
        }
    }
}

impl MeshGenerator {
    /// Generate a mesh from a height field
    ///
    /// Produces `x_dimension * z_dimension` vertices and two triangles per
    /// cell. Fails if the number of heights does not match the dimensions.
    pub fn generate_elevation_grid(&mut self, grid: &ElevationGrid, with_uv: bool) -> Result<Mesh> {
        let expected = lattice_size("elevation_grid", grid.z_dimension, grid.x_dimension)?;
        if grid.height.len() != expected {
            warn!(
                "generate_elevation_grid: expected {} heights, got {}",
                expected,
                grid.height.len()
            );
            return Err(GenerateError::HeightCountMismatch {
                expected,
                actual: grid.height.len(),
            });
        }

        let cells_x = grid.x_dimension.saturating_sub(1);
        let cells_z = grid.z_dimension.saturating_sub(1);
        let triangle_count = cells_x.saturating_mul(cells_z).saturating_mul(2);
        let mut mesh = Mesh::with_capacity(expected, triangle_count);

        for z in 0..grid.z_dimension {
            for x in 0..grid.x_dimension {
                mesh.add_vertex(
                    DVec3::new(
                        x as f64 * grid.x_spacing,
                        grid.height[z * grid.x_dimension + x],
                        z as f64 * grid.z_spacing,
                    )
                    .as_vec3(),
                );
            }
        }

        let width = grid.x_dimension as u32;
        for z in 0..cells_z as u32 {
            let current = z * width;
            let next = (z + 1) * width;
            for x in 0..cells_x as u32 {
                if grid.ccw {
                    mesh.add_triangle(x + current, x + next, x + 1 + next);
                    mesh.add_triangle(x + current, x + 1 + next, x + 1 + current);
                } else {
                    mesh.add_triangle(x + current, x + 1 + next, x + next);
                    mesh.add_triangle(x + current, x + 1 + current, x + 1 + next);
                }
            }
        }

        debug!(
            "generate_elevation_grid: {} x {} grid, {} triangles",
            grid.x_dimension,
            grid.z_dimension,
            mesh.triangle_count()
        );

        self.generate_normals(&mut mesh, grid.crease_angle);

        if with_uv {
            uv::elevation_grid_tex_coords(&mut mesh, grid);
        }

        self.update_bounding_box(&mut mesh);

        Ok(mesh)
    }
}
