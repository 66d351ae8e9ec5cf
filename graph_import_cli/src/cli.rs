//! Command-line arguments

use clap::{Parser, ValueEnum};
use graph_import_core::ErrorCode;
use std::path::PathBuf;

/// Which sink the per-unit boundaries report to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BoundaryTarget {
    /// Forward failures to the error recorder under their external code
    #[default]
    Recorder,
    /// Log failures at internal-error severity
    Logger,
}

#[derive(Debug, Parser)]
#[command(
    name = "graph-import",
    about = "Import JSON graph descriptions and report per-node failures",
    version
)]
pub struct Cli {
    /// Graph file or directory of `*.json` graph files
    pub path: PathBuf,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Error codes that do not fail a session (repeatable)
    #[arg(long = "allow", value_name = "CODE")]
    pub allow: Vec<ErrorCode>,

    /// Sink used by failure boundaries
    #[arg(long, value_enum, default_value_t = BoundaryTarget::Recorder)]
    pub boundary: BoundaryTarget,

    /// Emit JSON log lines
    #[arg(long)]
    pub structured: bool,

    /// Only search the top level of a directory
    #[arg(long)]
    pub no_recursive: bool,

    /// Write a JSON report of all sessions to FILE
    #[arg(long, value_name = "FILE")]
    pub json_report: Option<PathBuf>,

    /// Absorb panics inside a unit as uncategorized failures
    #[arg(long)]
    pub capture_panics: bool,

    /// Send recorder reports straight to the log instead of buffering them
    #[arg(long)]
    pub stream_errors: bool,
}
