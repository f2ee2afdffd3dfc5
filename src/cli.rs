//! Command-line interface built on clap.
//!
//! One positional argument (the log path) plus optional overrides for the
//! report destination, thresholds and output format.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Reports job durations from a START/END lifecycle log.
#[derive(Debug, Parser)]
#[command(name = "jobwatch", version, about)]
pub struct Cli {
    /// Path to the job log (`HH:MM:SS,<description>,START|END,<pid>` per line).
    pub log_path: PathBuf,

    /// Report file to write (defaults to `monitoring_report.txt`).
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// TOML config file; `jobwatch.toml` is used when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seconds above which a job is a WARNING.
    #[arg(long, value_name = "SECS")]
    pub warning_threshold: Option<u32>,

    /// Seconds above which a job is an ERROR.
    #[arg(long, value_name = "SECS")]
    pub error_threshold: Option<u32>,

    /// Report rendering.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Print debug diagnostics to stderr.
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable sections.
    Text,
    /// Pretty-printed JSON.
    Json,
}
