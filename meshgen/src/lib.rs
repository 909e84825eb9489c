//! meshgen - procedural mesh generation
//!
//! Synthesizes indexed triangle meshes for parametric primitives (box, sphere,
//! cylinder, cone, capsule, disc, torus, arrow), for cross sections swept
//! along a spine (extrusions) and for height fields (elevation grids).
//!
//! ```no_run
//! use meshgen::MeshGenerator;
//!
//! let mut generator = MeshGenerator::new();
//! generator.set_division_number(32);
//! let sphere = generator.generate_sphere(1.0, true)?;
//! assert!(sphere.has_normals() && sphere.has_tex_coords());
//! # Ok::<(), meshgen::GenerateError>(())
//! ```

pub mod config;
pub mod elevation_grid;
pub mod error;
pub mod export;
pub mod extract;
pub mod extrusion;
pub mod generator;
pub mod normals;
pub mod primitives;
pub mod triangulate;
pub mod types;
pub mod uv;

pub use config::{ConfigError, GeneratorConfig};
pub use elevation_grid::ElevationGrid;
pub use error::GenerateError;
pub use extrusion::{AxisAngle, Extrusion};
pub use generator::MeshGenerator;
pub use primitives::{ConeFaces, CylinderFaces};
pub use types::{BoundingBox, LineSet, Mesh, Primitive};
