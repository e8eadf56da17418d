//! hollow run command - hollow a mesh file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use hollow_core::{HollowConfig, HollowStats, hollow_with_artifacts};
use serde::Serialize;

use crate::{Cli, OutputFormat, output};

#[derive(Serialize)]
struct RunResult {
    input: String,
    output: String,
    success: bool,
    stats: HollowStats,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    input: &Path,
    output_path: Option<&Path>,
    config_path: Option<&Path>,
    artifact_dir: Option<&Path>,
    min_thickness: Option<f64>,
    quality: Option<f64>,
    closing_distance: Option<f64>,
    cli: &Cli,
) -> Result<()> {
    // Config file first, then flag overrides on top
    let mut config = match config_path {
        Some(path) => HollowConfig::load(path)?,
        None => HollowConfig::default(),
    };
    if let Some(t) = min_thickness {
        config.min_thickness = t;
    }
    if let Some(q) = quality {
        config.quality = q;
    }
    if let Some(d) = closing_distance {
        config.closing_distance = d;
    }
    config.validate()?;

    let out_path = match output_path {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input),
    };

    if !cli.quiet {
        output::info(
            &format!("Hollowing with {:.2}mm walls...", config.min_thickness),
            cli.format,
            cli.quiet,
        );
    }

    let stats = hollow_with_artifacts(input, &out_path, &config, artifact_dir)?;

    let result = RunResult {
        input: input.display().to_string(),
        output: out_path.display().to_string(),
        success: true,
        stats,
    };

    match cli.format {
        OutputFormat::Json => {
            output::print(&result, cli.format, cli.quiet);
        }
        OutputFormat::Text => {
            if !cli.quiet {
                output::success(
                    &format!("Hollowed mesh saved to {}", out_path.display()),
                    cli.format,
                    cli.quiet,
                );
                let s = &result.stats;
                println!(
                    "  {}: {} → {} faces",
                    "Faces".cyan(),
                    s.input_faces,
                    s.output_faces
                );
                if s.shell_generated {
                    println!(
                        "  {}: {} points, {} faces",
                        "Shell".cyan(),
                        s.shell_points,
                        s.shell_faces
                    );
                    println!(
                        "  {}: {:?} voxels at scale {:.1}",
                        "Grid".cyan(),
                        s.grid_dims,
                        s.voxel_scale
                    );
                } else if s.enabled {
                    println!(
                        "  {}: no cavity fits {:.2}mm walls, part left solid",
                        "Note".yellow(),
                        config.min_thickness
                    );
                }
                println!("  {}: {}ms", "Time".cyan(), s.total_time_ms);
            }
        }
    }

    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("hollowed");
    input.with_file_name(format!("{}_hollowed.stl", stem))
}
