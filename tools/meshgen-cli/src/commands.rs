//! Shape subcommands

use std::f64::consts::TAU;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use glam::DVec3;
use meshgen::{ConeFaces, CylinderFaces, ElevationGrid, Extrusion, LineSet, Mesh, MeshGenerator};

use crate::input;

#[derive(Subcommand)]
pub enum Commands {
    /// Axis-aligned box
    Box(BoxArgs),

    /// UV sphere
    Sphere(SphereArgs),

    /// Y-up cylinder
    Cylinder(CylinderArgs),

    /// Y-up cone
    Cone(ConeArgs),

    /// Y-up capsule
    Capsule(CapsuleArgs),

    /// Flat annulus facing +Y
    Disc(DiscArgs),

    /// Torus, or a partial torus when an angle range is given
    Torus(TorusArgs),

    /// Cylinder shaft with a cone head
    Arrow(ArrowArgs),

    /// Cross section swept along a spine, read from a TOML or JSON file
    Extrusion(ExtrusionArgs),

    /// Height field, read from a TOML or JSON file
    ElevationGrid(ElevationGridArgs),
}

#[derive(Args)]
pub struct BoxArgs {
    #[arg(long, default_value_t = 1.0)]
    pub x: f64,
    #[arg(long, default_value_t = 1.0)]
    pub y: f64,
    #[arg(long, default_value_t = 1.0)]
    pub z: f64,
}

#[derive(Args)]
pub struct SphereArgs {
    #[arg(short, long, default_value_t = 1.0)]
    pub radius: f64,
}

#[derive(Args)]
pub struct CylinderArgs {
    #[arg(short, long, default_value_t = 1.0)]
    pub radius: f64,
    #[arg(long, default_value_t = 1.0)]
    pub height: f64,
    /// Leave out the top cap
    #[arg(long)]
    pub no_top: bool,
    /// Leave out the bottom cap
    #[arg(long)]
    pub no_bottom: bool,
    /// Leave out the side
    #[arg(long)]
    pub no_side: bool,
}

#[derive(Args)]
pub struct ConeArgs {
    #[arg(short, long, default_value_t = 1.0)]
    pub radius: f64,
    #[arg(long, default_value_t = 1.0)]
    pub height: f64,
    /// Leave out the base
    #[arg(long)]
    pub no_bottom: bool,
    /// Leave out the side
    #[arg(long)]
    pub no_side: bool,
}

#[derive(Args)]
pub struct CapsuleArgs {
    #[arg(short, long, default_value_t = 0.5)]
    pub radius: f64,
    /// Length of the cylindrical part
    #[arg(long, default_value_t = 1.0)]
    pub height: f64,
}

#[derive(Args)]
pub struct DiscArgs {
    #[arg(short, long, default_value_t = 1.0)]
    pub radius: f64,
    #[arg(long, default_value_t = 0.5)]
    pub inner_radius: f64,
}

#[derive(Args)]
pub struct TorusArgs {
    #[arg(short, long, default_value_t = 1.0)]
    pub radius: f64,
    #[arg(long, default_value_t = 0.25)]
    pub cross_section_radius: f64,
    /// Start of the swept arc in radians
    #[arg(long, default_value_t = 0.0)]
    pub begin_angle: f64,
    /// End of the swept arc in radians
    #[arg(long, default_value_t = TAU)]
    pub end_angle: f64,
}

#[derive(Args)]
pub struct ArrowArgs {
    #[arg(long, default_value_t = 0.05)]
    pub cylinder_radius: f64,
    #[arg(long, default_value_t = 0.8)]
    pub cylinder_height: f64,
    #[arg(long, default_value_t = 0.1)]
    pub cone_radius: f64,
    #[arg(long, default_value_t = 0.2)]
    pub cone_height: f64,
}

#[derive(Args)]
pub struct ExtrusionArgs {
    /// Extrusion description (.toml or .json)
    pub file: PathBuf,
    /// Also build the wireframe line set
    #[arg(long)]
    pub wireframe: bool,
}

#[derive(Args)]
pub struct ElevationGridArgs {
    /// Elevation grid description (.toml or .json)
    pub file: PathBuf,
}

/// Result of running a subcommand
pub struct Generated {
    pub name: &'static str,
    pub mesh: Mesh,
    pub wireframe: Option<LineSet>,
}

impl Generated {
    fn mesh(name: &'static str, mesh: Mesh) -> Self {
        Self {
            name,
            mesh,
            wireframe: None,
        }
    }
}

impl Commands {
    /// Generate the requested shape
    pub fn execute(&self, generator: &mut MeshGenerator, uv: bool) -> Result<Generated> {
        let generated = match self {
            Commands::Box(args) => Generated::mesh(
                "box",
                generator.generate_box(DVec3::new(args.x, args.y, args.z), uv)?,
            ),
            Commands::Sphere(args) => {
                Generated::mesh("sphere", generator.generate_sphere(args.radius, uv)?)
            }
            Commands::Cylinder(args) => {
                let faces = CylinderFaces {
                    bottom: !args.no_bottom,
                    top: !args.no_top,
                    side: !args.no_side,
                };
                Generated::mesh(
                    "cylinder",
                    generator.generate_cylinder(args.radius, args.height, faces, uv)?,
                )
            }
            Commands::Cone(args) => {
                let faces = ConeFaces {
                    bottom: !args.no_bottom,
                    side: !args.no_side,
                };
                Generated::mesh(
                    "cone",
                    generator.generate_cone(args.radius, args.height, faces, uv)?,
                )
            }
            Commands::Capsule(args) => Generated::mesh(
                "capsule",
                generator.generate_capsule(args.radius, args.height)?,
            ),
            Commands::Disc(args) => Generated::mesh(
                "disc",
                generator.generate_disc(args.radius, args.inner_radius)?,
            ),
            Commands::Torus(args) => Generated::mesh(
                "torus",
                generator.generate_torus_arc(
                    args.radius,
                    args.cross_section_radius,
                    args.begin_angle,
                    args.end_angle,
                )?,
            ),
            Commands::Arrow(args) => Generated::mesh(
                "arrow",
                generator.generate_arrow(
                    args.cylinder_radius,
                    args.cylinder_height,
                    args.cone_radius,
                    args.cone_height,
                )?,
            ),
            Commands::Extrusion(args) => {
                let extrusion: Extrusion = input::load(&args.file)?;
                let mesh = generator.generate_extrusion(&extrusion, uv)?;
                let wireframe = if args.wireframe {
                    Some(generator.generate_extrusion_line_set(&extrusion, &mesh)?)
                } else {
                    None
                };
                Generated {
                    name: "extrusion",
                    mesh,
                    wireframe,
                }
            }
            Commands::ElevationGrid(args) => {
                let grid: ElevationGrid = input::load(&args.file)?;
                Generated::mesh(
                    "elevation_grid",
                    generator.generate_elevation_grid(&grid, uv)?,
                )
            }
        };
        Ok(generated)
    }
}
