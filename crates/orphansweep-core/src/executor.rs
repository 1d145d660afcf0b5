//! Plan reporting and execution

use crate::error::{OrphanSweepError, Result};
use crate::resolver::DeletionPlan;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Run statistics gathered while planning
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepStats {
    pub media_roots: BTreeSet<PathBuf>,
    pub skip_roots: BTreeSet<PathBuf>,
    pub exclude_files: BTreeSet<String>,
    pub total_files: usize,
    pub needed_files: usize,
}

/// Dry-run report
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub stats: SweepStats,
    pub file_count: usize,
    pub dir_count: usize,
    pub freed_bytes: u64,
    pub freed: String,
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

/// What an execute run removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExecutionSummary {
    pub files_removed: usize,
    pub dirs_removed: usize,
}

/// Describe a plan without touching anything.
///
/// A file that vanished or cannot be stat'ed since planning counts as zero
/// bytes.
pub fn report(plan: &DeletionPlan, stats: SweepStats) -> Report {
    let freed_bytes: u64 = plan
        .files
        .iter()
        .map(|f| match fs::metadata(f) {
            Ok(m) => m.len(),
            Err(e) => {
                warn!("Cannot size {}: {}", f.display(), e);
                0
            }
        })
        .sum();

    Report {
        stats,
        file_count: plan.files.len(),
        dir_count: plan.dirs.len(),
        freed_bytes,
        freed: format_megabytes(freed_bytes),
        files: plan.files.clone(),
        dirs: plan.dirs.clone(),
    }
}

/// Apply a plan.
///
/// Files are removed in plan order and the first failure aborts, leaving
/// everything before it deleted. Directories are removed recursively on a
/// best-effort basis.
pub fn execute(plan: &DeletionPlan) -> Result<ExecutionSummary> {
    let mut summary = ExecutionSummary::default();

    for file in &plan.files {
        fs::remove_file(file).map_err(|source| OrphanSweepError::Deletion {
            path: file.clone(),
            source,
        })?;
        debug!("Removed file {}", file.display());
        summary.files_removed += 1;
    }

    for dir in &plan.dirs {
        match fs::remove_dir_all(dir) {
            Ok(()) => {
                debug!("Removed directory {}", dir.display());
                summary.dirs_removed += 1;
            }
            Err(e) => debug!("Ignoring failure to remove {}: {}", dir.display(), e),
        }
    }

    info!(
        "Removed {} files and {} directories",
        summary.files_removed, summary.dirs_removed
    );
    Ok(summary)
}

/// Format a byte count as megabytes with one decimal
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
}
