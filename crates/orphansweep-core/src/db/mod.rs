//! Database layer for orphansweep
//!
//! SQLite-backed record catalog: which record types each domain owns, which
//! of their fields reference files, and the tables holding the live records.

mod catalog;
mod schema;

pub use catalog::RecordTypeInfo;
pub use schema::Database;
use std::path::PathBuf;

/// Environment variable overriding the catalog database location
pub const DB_ENV: &str = "ORPHANSWEEP_DB";

impl Database {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::DATA_DIR_NAME)
            .join("catalog.sqlite")
    }
}
