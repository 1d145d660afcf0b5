//! Terminal output formatter

use orphansweep_core::{RecordTypeInfo, Report};
use std::fmt::Display;

pub fn format_report(report: &Report) -> String {
    let mut output = String::new();

    push_list(
        &mut output,
        "Media roots",
        report.stats.media_roots.iter().map(|p| p.display()),
    );
    push_list(
        &mut output,
        "Skip roots",
        report.stats.skip_roots.iter().map(|p| p.display()),
    );
    push_list(&mut output, "Excluded files", report.stats.exclude_files.iter());

    output.push('\n');
    output.push_str(&format!("Total files:     {}\n", report.stats.total_files));
    output.push_str(&format!("Needed files:    {}\n", report.stats.needed_files));

    if !report.dirs.is_empty() {
        output.push('\n');
        push_list(
            &mut output,
            "Empty directories to remove",
            report.dirs.iter().map(|p| p.display()),
        );
    }

    output.push('\n');
    if report.files.is_empty() {
        output.push_str("No files to delete!\n");
    } else {
        push_list(
            &mut output,
            "Files to delete",
            report.files.iter().map(|p| p.display()),
        );
        output.push_str(&format!(
            "\n{} files will be deleted, freeing {}.\n",
            report.file_count, report.freed
        ));
    }

    output
}

pub fn format_record_types(record_types: &[RecordTypeInfo]) -> String {
    if record_types.is_empty() {
        return "No record types\n".to_string();
    }

    let mut output = String::new();
    for rt in record_types {
        let status = if rt.resolved { "" } else { " (unresolved)" };
        let fields = if rt.file_fields.is_empty() {
            "-".to_string()
        } else {
            rt.file_fields.join(", ")
        };
        output.push_str(&format!("{}.{}{}: {}\n", rt.domain, rt.name, status, fields));
    }
    output
}

fn push_list<I, T>(output: &mut String, title: &str, items: I)
where
    I: Iterator<Item = T>,
    T: Display,
{
    output.push_str(&format!("{}:\n", title));
    let mut any = false;
    for item in items {
        output.push_str(&format!("  {}\n", item));
        any = true;
    }
    if !any {
        output.push_str("  (none)\n");
    }
}
