//! JSON output formatter

use orphansweep_core::{RecordTypeInfo, Report};

pub fn format_report(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string()) + "\n"
}

pub fn format_record_types(record_types: &[RecordTypeInfo]) -> String {
    serde_json::to_string_pretty(record_types).unwrap_or_else(|_| "[]".to_string()) + "\n"
}
