//! CLI argument definitions for the catalog export tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "catalog-export",
    version,
    about = "Build nested catalog JSON from flat collection-management exports",
    long_about = "Join museum object records with their media, conservation \
                  interventions, and user-defined fields into one nested JSON \
                  document per object."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Assemble and write the catalog file from a data folder.
    Export(ExportArgs),

    /// List the expected input tables and their join columns.
    Tables,
}

#[derive(Parser)]
pub struct ExportArgs {
    /// Path to the folder containing the six source CSV tables.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output file path (default: <DATA_DIR>/catalog.json).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file overriding the default join-key column names.
    #[arg(long = "schema", value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Assemble and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
