//! Orphansweep Core Library
//!
//! Finds media files that no registered record references, plus the
//! directories left empty around them, and removes them.
//!
//! # Features
//! - Single-pass scan of every configured media root
//! - Needed-file collection through a pluggable record [`Catalog`]
//! - SQLite-backed catalog for registered record types
//! - Dry-run reports and permanent, ordered deletion

pub mod catalog;
pub mod collector;
pub mod config;
pub mod db;
pub mod error;
pub mod executor;
pub mod paths;
pub mod resolver;
pub mod scanner;
pub mod sweep;

pub use catalog::{Catalog, FieldDescriptor, FieldKind, RecordType};
pub use collector::collect_needed;
pub use config::{Config, DomainConfig, OneOrMany};
pub use db::{Database, RecordTypeInfo};
pub use error::{Error, OrphanSweepError, Result};
pub use executor::{ExecutionSummary, Report, SweepStats};
pub use paths::Containment;
pub use resolver::{resolve, DeletionPlan, ResolveInput};
pub use scanner::{scan_root, ScanOptions, ScanOutcome};
pub use sweep::{plan, Sweep};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "orphansweep";

/// Default data directory name
pub const DATA_DIR_NAME: &str = "orphansweep";
