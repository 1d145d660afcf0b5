//! Error types for orphansweep

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using OrphanSweepError
pub type Result<T> = std::result::Result<T, OrphanSweepError>;

/// Error type alias for convenience
pub type Error = OrphanSweepError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INVALID_CONFIG: i32 = 3;
    pub const FILESYSTEM_ACCESS: i32 = 4;
    pub const DELETION_FAILED: i32 = 5;
}

/// Main error type for orphansweep
#[derive(Debug, Error)]
pub enum OrphanSweepError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Cannot access media root {}: {source}", path.display())]
    FilesystemAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Unresolved record type: {0}")]
    MetadataResolution(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to delete {}: {source}", path.display())]
    Deletion {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OrphanSweepError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Yaml(_) => exit_codes::INVALID_CONFIG,
            Self::FilesystemAccess { .. } | Self::WalkDir(_) => exit_codes::FILESYSTEM_ACCESS,
            Self::Deletion { .. } => exit_codes::DELETION_FAILED,
            _ => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether the collector may skip past this error and keep going
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::MetadataResolution(_))
    }
}
