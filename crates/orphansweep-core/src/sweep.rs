//! Sweep pipeline
//!
//! configuration -> scan every media root -> collect needed files for every
//! domain -> resolve. Each phase hands an immutable value to the next and the
//! union/difference work happens once, in the resolver. A scan or collection
//! failure aborts planning; no partial plan is ever produced.
//!
//! Files written while a sweep is planning can be classified as orphaned.
//! Do not run a sweep while the application is writing new media.

use crate::catalog::Catalog;
use crate::collector::collect_needed;
use crate::config::Config;
use crate::error::Result;
use crate::executor::{self, ExecutionSummary, Report, SweepStats};
use crate::resolver::{resolve, DeletionPlan, ResolveInput};
use crate::scanner::{scan_root, ScanOptions, ScanOutcome};
use std::collections::BTreeSet;
use tracing::info;

/// A computed sweep: the plan plus what it was computed from
#[derive(Debug, Clone)]
pub struct Sweep {
    pub plan: DeletionPlan,
    pub stats: SweepStats,
}

impl Sweep {
    /// Dry-run report of this sweep
    pub fn report(&self) -> Report {
        executor::report(&self.plan, self.stats.clone())
    }

    /// Delete everything in the plan
    pub fn execute(&self) -> Result<ExecutionSummary> {
        executor::execute(&self.plan)
    }
}

/// Plan a sweep for every active domain of `config`
pub fn plan(config: &Config, catalog: &dyn Catalog) -> Result<Sweep> {
    let media_roots = config.media_roots();
    let skip_roots = config.skip_roots();
    let exclude_files = config.exclude_files();
    let options = ScanOptions {
        exclude_files: exclude_files.clone(),
    };

    let scanned = media_roots
        .iter()
        .map(|root| {
            info!("Scanning {}", root.display());
            scan_root(root, &options)
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .fold(ScanOutcome::default(), ScanOutcome::merge);

    let mut needed_files = BTreeSet::new();
    for (domain, _) in config.active_domains() {
        info!("Inspecting domain {}", domain);
        needed_files.extend(collect_needed(catalog, domain, &config.media_base)?);
    }

    let stats = SweepStats {
        media_roots: media_roots.clone(),
        skip_roots: skip_roots.clone(),
        exclude_files,
        total_files: scanned.files.len(),
        needed_files: needed_files.len(),
    };

    let input = ResolveInput {
        all_files: scanned.files,
        needed_files,
        empty_dirs: scanned.empty_dirs,
        skip_roots,
        media_roots,
        containment: config.containment,
    };
    let plan = resolve(&input);

    info!(
        "Planned {} files and {} directories for deletion",
        plan.files.len(),
        plan.dirs.len()
    );

    Ok(Sweep { plan, stats })
}
