//! meshgen CLI - generate procedural meshes from the command line
//!
//! # Usage
//!
//! ```bash
//! # Print a JSON summary of a 32-division sphere
//! meshgen --divisions 32 sphere --radius 2
//!
//! # Write a capped cylinder with UVs to an OBJ file
//! meshgen --uv --output cylinder.obj cylinder --radius 0.5 --height 2
//!
//! # Sweep an extrusion described in TOML (or JSON)
//! meshgen --output pipe.obj extrusion pipe.toml
//! ```
//!
//! Generator settings can also come from a TOML file (`--config`); command
//! line flags override it.

mod commands;
mod input;
mod summary;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser};
use meshgen::{GeneratorConfig, MeshGenerator};
use tracing::info;

use crate::commands::Commands;

/// Procedural mesh generator
#[derive(Parser)]
#[command(name = "meshgen")]
#[command(about = "Generate procedural meshes")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every shape
#[derive(Args)]
struct CommonArgs {
    /// Generator settings (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tessellation resolution (negative selects the default)
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    divisions: Option<i32>,

    /// Skip normal generation
    #[arg(long, global = true)]
    no_normals: bool,

    /// Generate texture coordinates
    #[arg(long, global = true)]
    uv: bool,

    /// Write the mesh to this OBJ file instead of printing a summary
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

impl CommonArgs {
    fn generator(&self) -> Result<MeshGenerator> {
        let config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        let mut generator = MeshGenerator::with_config(config);
        if let Some(divisions) = self.divisions {
            generator.set_division_number(divisions);
        }
        if self.no_normals {
            generator.set_normal_generation_enabled(false);
        }
        Ok(generator)
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut generator = cli.common.generator()?;
    let output = cli.command.execute(&mut generator, cli.common.uv)?;

    match &cli.common.output {
        Some(path) => {
            meshgen::export::save_obj(&output.mesh, path, output.name)
                .with_context(|| format!("Failed to write OBJ file: {}", path.display()))?;
            info!(
                "Wrote {} ({} vertices, {} triangles)",
                path.display(),
                output.mesh.vertex_count(),
                output.mesh.triangle_count()
            );
        }
        None => {
            let summary = summary::MeshSummary::new(&output);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
