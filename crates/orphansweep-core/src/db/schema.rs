//! Database schema and initialization

use crate::error::Result;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

/// Main database handle
pub struct Database {
    pub(crate) conn: Connection,
}

const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = r#"
-- Record types registered per domain. backing_table names the table that
-- holds the live records; NULL means registered but not implemented.
CREATE TABLE IF NOT EXISTS record_types (
    domain TEXT NOT NULL,
    name TEXT NOT NULL,
    backing_table TEXT,
    PRIMARY KEY (domain, name)
);

-- Field definitions with a semantic kind tag ('file', 'image', ...)
CREATE TABLE IF NOT EXISTS record_fields (
    domain TEXT NOT NULL,
    record_type TEXT NOT NULL,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    PRIMARY KEY (domain, record_type, name),
    FOREIGN KEY (domain, record_type) REFERENCES record_types(domain, name) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_record_types_domain ON record_types(domain);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

impl Database {
    /// Open database at path, creating if necessary
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an existing database without write access.
    ///
    /// Nothing is created or initialized; a missing file is an error.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.busy_timeout(Duration::from_millis(5000))?;
        Ok(Self { conn })
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Initialize database schema
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;

        self.conn.execute_batch(CREATE_TABLES)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<Option<i32>> {
        let result = self
            .conn
            .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                row.get(0)
            })?;
        Ok(result)
    }

    /// Raw connection, for callers that maintain the record tables themselves
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
