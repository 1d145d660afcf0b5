//! Path normalization and containment checks
//!
//! Every path that enters a sweep goes through [`normalize`], so that the
//! scanner, the collector and the configured skip roots all agree on one
//! spelling of the same location. Identity is purely lexical: no symlink
//! resolution, no `..` folding, case-sensitive.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// How "directory `d` contains path `p`" is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Containment {
    /// Raw string prefix at position 0. `/media/foo` contains `/media/foobar`.
    /// Conservative: may keep a directory that could have been removed, never
    /// removes one that holds files.
    #[default]
    Literal,
    /// Component-wise prefix. `/media/foo` does not contain `/media/foobar`.
    Segment,
}

/// Lexically normalize a path.
///
/// Collapses repeated separators, drops `.` components and trailing
/// separators. `..` is kept as-is.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    path.as_ref().components().collect()
}

/// Normalize and deduplicate a collection of paths
pub fn normalize_all<I, P>(paths: I) -> BTreeSet<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths.into_iter().map(normalize).collect()
}

/// Check whether `prefix` is a prefix of `path` under the given containment mode
pub fn has_prefix(path: &Path, prefix: &Path, mode: Containment) -> bool {
    match mode {
        Containment::Literal => path
            .as_os_str()
            .as_encoded_bytes()
            .starts_with(prefix.as_os_str().as_encoded_bytes()),
        Containment::Segment => path.starts_with(prefix),
    }
}

/// Check whether any path in `paths` has `prefix` as a prefix
pub fn any_has_prefix<'a, I>(paths: I, prefix: &Path, mode: Containment) -> bool
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    paths.into_iter().any(|p| has_prefix(p, prefix, mode))
}
