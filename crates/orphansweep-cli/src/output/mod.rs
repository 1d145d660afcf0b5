//! Output formatters

pub mod json;
pub mod terminal;

use crate::app::OutputFormat;
use orphansweep_core::{RecordTypeInfo, Report};

/// Format a dry-run report
pub fn format_report(report: &Report, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_report(report),
        OutputFormat::Cli => terminal::format_report(report),
    }
}

/// Format the record type listing
pub fn format_record_types(record_types: &[RecordTypeInfo], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_record_types(record_types),
        OutputFormat::Cli => terminal::format_record_types(record_types),
    }
}
