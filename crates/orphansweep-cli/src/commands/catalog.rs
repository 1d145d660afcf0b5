//! Catalog inspection command

use crate::app::OutputFormat;
use crate::output;
use anyhow::Result;
use orphansweep_core::Database;

pub fn run(db: &Database, format: OutputFormat) -> Result<()> {
    let record_types = db.list_record_types()?;
    print!("{}", output::format_record_types(&record_types, format));
    Ok(())
}
