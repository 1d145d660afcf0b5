//! Sweep command

use crate::app::{OutputFormat, SweepArgs};
use crate::output;
use anyhow::Result;
use orphansweep_core::{Config, Database};

pub fn run(args: SweepArgs, config: &Config, db: &Database, format: OutputFormat) -> Result<()> {
    let sweep = orphansweep_core::plan(config, db)?;

    if args.info {
        print!("{}", output::format_report(&sweep.report(), format));
    } else {
        sweep.execute()?;
    }
    Ok(())
}
