//! Media root scanning
//!
//! Walks a root once and reports every file on disk plus every directory
//! that holds no files. A directory counts as holding files if its raw
//! listing has any non-directory entry, even when all of those entries are
//! excluded from the reported file set.

use crate::error::{OrphanSweepError, Result};
use crate::paths;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Scan options
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Basenames that are never reported as media files
    pub exclude_files: BTreeSet<String>,
}

impl ScanOptions {
    pub fn with_excludes<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exclude_files: names.into_iter().map(Into::into).collect(),
        }
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.exclude_files.contains(&*name)
    }
}

/// Scan result for one or more roots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Files on disk, minus excluded basenames
    pub files: BTreeSet<PathBuf>,
    /// Directories without files, never including a scanned root itself
    pub empty_dirs: BTreeSet<PathBuf>,
}

impl ScanOutcome {
    /// Union of two outcomes
    pub fn merge(mut self, other: ScanOutcome) -> Self {
        self.files.extend(other.files);
        self.empty_dirs.extend(other.empty_dirs);
        self
    }
}

/// Scan a media root for files and empty directories.
///
/// Fails with `FilesystemAccess` when the root is missing, is not a
/// directory, or cannot be listed. Any unreadable entry below the root
/// aborts the scan too: a directory whose listing failed would otherwise
/// look empty.
pub fn scan_root(root: &Path, options: &ScanOptions) -> Result<ScanOutcome> {
    check_root(root)?;

    let mut files = BTreeSet::new();
    // directory -> holds at least one file
    let mut dirs: BTreeMap<PathBuf, bool> = BTreeMap::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| root_error(root, e))?;
        if entry.depth() == 0 {
            continue;
        }

        let path = paths::normalize(entry.path());
        if entry.file_type().is_dir() {
            dirs.entry(path).or_insert(false);
            continue;
        }
        if is_dir_symlink(&entry) {
            continue;
        }

        if entry.depth() > 1 {
            if let Some(parent) = path.parent() {
                dirs.insert(parent.to_path_buf(), true);
            }
        }
        if !options.is_excluded(&entry) {
            files.insert(path);
        }
    }

    let empty_dirs: BTreeSet<PathBuf> = dirs
        .into_iter()
        .filter(|(_, has_files)| !has_files)
        .map(|(dir, _)| dir)
        .collect();

    debug!(
        "Scanned {}: {} files, {} empty directories",
        root.display(),
        files.len(),
        empty_dirs.len()
    );

    Ok(ScanOutcome { files, empty_dirs })
}

fn check_root(root: &Path) -> Result<()> {
    let access = |source: io::Error| OrphanSweepError::FilesystemAccess {
        path: root.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(root).map_err(access)?;
    if !metadata.is_dir() {
        return Err(access(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }
    fs::read_dir(root).map_err(access)?;
    Ok(())
}

fn root_error(root: &Path, err: walkdir::Error) -> OrphanSweepError {
    if err.depth() == 0 {
        if let Some(io_err) = err.io_error() {
            return OrphanSweepError::FilesystemAccess {
                path: root.to_path_buf(),
                source: io::Error::new(io_err.kind(), io_err.to_string()),
            };
        }
    }
    OrphanSweepError::WalkDir(err)
}

/// Symlinks to directories are listed like directories but never descended
fn is_dir_symlink(entry: &DirEntry) -> bool {
    entry.file_type().is_symlink() && entry.path().is_dir()
}
