//! Shared output helpers for text and JSON formatting.

use colored::Colorize;
use serde::Serialize;

use crate::OutputFormat;

/// Print a serializable result as pretty JSON.
///
/// JSON output is the machine-readable contract of `--format json`, so
/// `quiet` does not suppress it; in text mode nothing is printed here
/// because the commands format their own text output.
pub fn print<T: Serialize>(value: &T, format: OutputFormat, _quiet: bool) {
    if let OutputFormat::Json = format {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}: failed to serialize result: {}", "Error".red().bold(), e),
        }
    }
}

/// Print a progress message in text mode.
pub fn info(message: &str, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Text = format {
        println!("{}", message);
    }
}

/// Print a success message with a check mark in text mode.
pub fn success(message: &str, format: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    if let OutputFormat::Text = format {
        println!("{} {}", "✓".green().bold(), message);
    }
}
