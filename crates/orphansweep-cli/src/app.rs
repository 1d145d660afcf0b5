//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orphansweep")]
#[command(
    author,
    version,
    about = "Delete media files that no registered record references",
    long_about = "Delete media files that no registered record references.\n\n\
                  Deletions are permanent. Do not run while the application is \
                  writing new media: files written during a sweep may be treated \
                  as orphaned."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (YAML)
    #[arg(long, global = true, env = "ORPHANSWEEP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog database
    #[arg(long, global = true, env = "ORPHANSWEEP_DB")]
    pub db: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Delete orphaned media files and empty directories
    Sweep(SweepArgs),

    /// List registered record types and their file fields
    Catalog,
}

#[derive(Args)]
pub struct SweepArgs {
    /// Only report what would be deleted
    #[arg(long)]
    pub info: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
