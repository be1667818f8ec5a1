//! CLI configuration for the `exif-probe` binary.
//!
//! Options can also be set via environment variables with the
//! `EXIF_PROBE_` prefix:
//!
//! - `EXIF_PROBE_FORMAT` - output format (`text` or `json`)
//! - `EXIF_PROBE_VERBOSE` - enable decode tracing

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format for the decoded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per directory entry
    Text,
    /// The whole tree as indented JSON
    Json,
}

/// Exif Probe - dump the Exif metadata tree of a JPEG file.
///
/// Reads the file, locates the Exif APP1 segment, decodes the TIFF
/// directory structure, and prints it. Structurally invalid input is
/// reported with the offending directory and entry, never repaired.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-probe")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the JPEG file to inspect.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value = "text", env = "EXIF_PROBE_FORMAT")]
    pub format: OutputFormat,

    /// Log decode progress (directories entered, values resolved).
    #[arg(short, long, env = "EXIF_PROBE_VERBOSE")]
    pub verbose: bool,
}
