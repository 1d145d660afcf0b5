//! Orphansweep CLI
//!
//! Remove media files that no registered record references.

use anyhow::{bail, Result};
use clap::Parser;
use orphansweep_core::error::exit_codes;
use orphansweep_core::{Config, Database, OrphanSweepError};
use std::process::ExitCode;

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the report
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<OrphanSweepError>()
                .map(|e| e.exit_code())
                .unwrap_or(exit_codes::GENERAL_ERROR);
            ExitCode::from(code as u8)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = cli.db.clone().unwrap_or_else(Database::default_path);
    // An empty catalog references nothing, which would orphan every file
    if !db_path.exists() {
        bail!("catalog database not found: {}", db_path.display());
    }
    // Sweeping only reads the catalog
    let db = Database::open_read_only(&db_path)?;

    match cli.command {
        Commands::Sweep(args) => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            commands::sweep::run(args, &config, &db, cli.format)
        }
        Commands::Catalog => commands::catalog::run(&db, cli.format),
    }
}
