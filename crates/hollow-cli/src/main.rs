//! hollow-cli: Command-line interface for mesh hollowing.
//!
//! This tool exposes hollow-core from the command line, suitable for
//! scripting and print-preparation pipelines.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=hollow_core=info` - Basic operation logging
//! - `RUST_LOG=hollow_core=debug` - Detailed pipeline logging
//! - `RUST_LOG=debug` - All debug output
//!
//! # Example
//!
//! ```bash
//! # Hollow with info logging
//! RUST_LOG=hollow_core=info hollow run input.stl -o output.stl
//!
//! # Debug output for troubleshooting
//! RUST_LOG=debug hollow info input.stl
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod output;

use commands::{info, run};

/// hollow - A command-line tool for hollowing solid meshes.
///
/// Carve an interior cavity with a guaranteed wall thickness to cut
/// material usage before 3D printing.
#[derive(Parser)]
#[command(name = "hollow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format for results
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Suppress all non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for scripting
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Hollow a mesh, leaving walls of at least the configured thickness
    Run {
        /// Input mesh file
        input: PathBuf,

        /// Output file path (defaults to <input stem>_hollowed.stl)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hollowing config file (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for inspection artifacts (input copy, interior shell)
        #[arg(long)]
        artifact_dir: Option<PathBuf>,

        /// Minimum wall thickness in mm (overrides config file)
        #[arg(long)]
        min_thickness: Option<f64>,

        /// Sampling quality from 0.0 (fast) to 1.0 (fine), overrides config file
        #[arg(long)]
        quality: Option<f64>,

        /// Morphological closing distance in mm (overrides config file)
        #[arg(long)]
        closing_distance: Option<f64>,
    },

    /// Display mesh statistics and information
    Info {
        /// Input mesh file
        input: PathBuf,

        /// Show volume and surface area as well
        #[arg(long)]
        detailed: bool,
    },
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    // If quiet, don't initialize any tracing
    if quiet {
        return;
    }

    // Determine log level based on verbosity flag
    // Check RUST_LOG first, then fall back to -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "hollow_core=info,hollow_mesh=info",
            2 => "hollow_core=debug,hollow_mesh=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Initialize the subscriber
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Install miette's panic hook for better error display
    // This makes panics show nicer error reports in development
    #[cfg(debug_assertions)]
    miette::set_panic_hook();

    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Run {
            input,
            output,
            config,
            artifact_dir,
            min_thickness,
            quality,
            closing_distance,
        } => run::run(
            input,
            output.as_deref(),
            config.as_deref(),
            artifact_dir.as_deref(),
            *min_thickness,
            *quality,
            *closing_distance,
            &cli,
        ),
        Commands::Info { input, detailed } => info::run(input, *detailed, &cli),
    };

    if let Err(e) = &result {
        if !cli.quiet {
            // Check if the error is a miette Diagnostic for enhanced display
            if let Some(hollow_err) = e.downcast_ref::<hollow_core::HollowError>() {
                // Display error with code and help text
                eprintln!("{}: {}", "Error".red().bold(), hollow_err);
                eprintln!("  {}: {}", "Code".cyan(), hollow_err.code());
                eprintln!(
                    "  {}: {}",
                    "Suggestion".green(),
                    hollow_err.recovery_suggestion()
                );
            } else if let Some(mesh_err) = e.downcast_ref::<hollow_mesh::MeshError>() {
                eprintln!("{}: {}", "Error".red().bold(), mesh_err);
                eprintln!("  {}: {}", "Code".cyan(), mesh_err.code());
                eprintln!(
                    "  {}: {}",
                    "Suggestion".green(),
                    mesh_err.recovery_suggestion()
                );
            } else {
                // Fall back to standard error display
                eprintln!("{}: {}", "Error".red().bold(), e);
                for cause in e.chain().skip(1) {
                    eprintln!("  {}: {}", "Caused by".yellow(), cause);
                }
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
