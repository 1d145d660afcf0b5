//! Deletion plan resolution
//!
//! Pure set algebra over scanner and collector output. Nothing here touches
//! the filesystem, so resolution cannot fail.

use crate::paths::{self, Containment};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Everything the resolver needs, already unioned across roots and domains
#[derive(Debug, Clone, Default)]
pub struct ResolveInput {
    pub all_files: BTreeSet<PathBuf>,
    pub needed_files: BTreeSet<PathBuf>,
    pub empty_dirs: BTreeSet<PathBuf>,
    pub skip_roots: BTreeSet<PathBuf>,
    pub media_roots: BTreeSet<PathBuf>,
    pub containment: Containment,
}

/// Files and directories to remove, sorted and deduplicated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionPlan {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

impl DeletionPlan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty()
    }
}

/// Compute the deletion plan.
///
/// Files: every scanned file no record references. Directories: every empty
/// candidate that is not a prefix of any scanned file, skip root or media
/// root. A skip root therefore protects its ancestors, not its descendants,
/// and a media root nested inside another root is never removed.
pub fn resolve(input: &ResolveInput) -> DeletionPlan {
    let files = input
        .all_files
        .difference(&input.needed_files)
        .cloned()
        .collect();

    let dirs = input
        .empty_dirs
        .iter()
        .filter(|d| !paths::any_has_prefix(&input.all_files, d, input.containment))
        .filter(|d| !paths::any_has_prefix(&input.skip_roots, d, input.containment))
        .filter(|d| !paths::any_has_prefix(&input.media_roots, d, input.containment))
        .cloned()
        .collect();

    DeletionPlan { files, dirs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(paths: &[&str]) -> BTreeSet<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    fn media_input() -> ResolveInput {
        ResolveInput {
            all_files: set(&["/media/a.jpg", "/media/b.jpg"]),
            needed_files: set(&["/media/a.jpg"]),
            empty_dirs: set(&["/media/empty"]),
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_plan() {
        let plan = resolve(&media_input());
        assert_eq!(plan.files, vec![PathBuf::from("/media/b.jpg")]);
        assert_eq!(plan.dirs, vec![PathBuf::from("/media/empty")]);
    }

    #[test]
    fn test_ancestor_skip_root_does_not_protect() {
        let mut input = media_input();
        input.skip_roots = set(&["/media"]);
        let plan = resolve(&input);
        assert_eq!(plan.dirs, vec![PathBuf::from("/media/empty")]);
    }

    #[test]
    fn test_descendant_skip_root_protects() {
        let mut input = media_input();
        input.skip_roots = set(&["/media/empty/deep"]);
        assert!(resolve(&input).dirs.is_empty());

        input.skip_roots = set(&["/media/empty"]);
        assert!(resolve(&input).dirs.is_empty());
    }

    #[test]
    fn test_nested_media_root_is_kept() {
        let mut input = media_input();
        input.empty_dirs = set(&["/media/avatars", "/media/empty"]);
        input.media_roots = set(&["/media", "/media/avatars"]);
        assert_eq!(resolve(&input).dirs, vec![PathBuf::from("/media/empty")]);

        input.media_roots = set(&["/media", "/media/avatars/large"]);
        assert_eq!(resolve(&input).dirs, vec![PathBuf::from("/media/empty")]);
    }

    #[test]
    fn test_dir_containing_files_is_kept() {
        let mut input = media_input();
        input.empty_dirs = set(&["/media/outer"]);
        input.all_files.insert(PathBuf::from("/media/outer/inner/c.jpg"));
        assert!(resolve(&input).dirs.is_empty());
    }

    #[test]
    fn test_literal_prefix_keeps_similar_names() {
        let mut input = media_input();
        input.empty_dirs = set(&["/media/foo"]);
        input.all_files.insert(PathBuf::from("/media/foobar/x.jpg"));
        assert!(resolve(&input).dirs.is_empty());

        input.containment = Containment::Segment;
        assert_eq!(resolve(&input).dirs, vec![PathBuf::from("/media/foo")]);
    }

    #[test]
    fn test_needed_but_missing_files_are_ignored() {
        let mut input = media_input();
        input.needed_files.insert(PathBuf::from("/media/gone.jpg"));
        assert_eq!(resolve(&input).files, vec![PathBuf::from("/media/b.jpg")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve(&ResolveInput::default()).is_empty());
    }
}
