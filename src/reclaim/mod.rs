//! Empty-directory reclamation
//!
//! Runs after a job's deletions. Candidates are the directories the
//! [`Walker`] traverses, processed longest path first so that a child is
//! normally removed before its parent is checked. That lets one pass collapse
//! a chain like `a/b/c` of empty directories.
//!
//! Ordering is by path string length, not by component count. Two siblings
//! at different depths can tie or invert (`root/abcdefgh` vs `root/a/b`); the
//! parent of a removed child is then still caught by the next run.

use crate::env::FileEnv;
use crate::walker::Walker;
use std::cmp::Reverse;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Removes empty directories under a job root.
pub struct Reclaimer<'a, E: FileEnv> {
    env: &'a E,
    dry_run: bool,
}

impl<'a, E: FileEnv> Reclaimer<'a, E> {
    pub fn new(env: &'a E, dry_run: bool) -> Self {
        Self { env, dry_run }
    }

    /// Remove (or in a dry run, report) every empty directory under the
    /// walker's root. `on_removed` is called for each one; the count is returned.
    ///
    /// Removal failures are skipped silently.
    pub fn reclaim(&self, walker: &Walker<'_>, mut on_removed: impl FnMut(&Path)) -> usize {
        let mut removed = 0;

        for dir in removal_order(walker.dirs().collect()) {
            match self.try_remove(&dir) {
                Ok(true) => {
                    removed += 1;
                    on_removed(&dir);
                }
                Ok(false) => {}
                Err(e) => trace!("Skipping directory {}: {}", dir.display(), e),
            }
        }

        removed
    }

    /// `Ok(true)` if the directory was (or in a dry run, would be) removed.
    fn try_remove(&self, dir: &Path) -> std::io::Result<bool> {
        let file_type = self.env.symlink_metadata(dir)?.file_type();
        if file_type.is_symlink() || !file_type.is_dir() {
            return Ok(false);
        }
        if !self.env.is_dir_empty(dir)? {
            return Ok(false);
        }
        if !self.dry_run {
            self.env.remove_dir(dir)?;
        }
        Ok(true)
    }
}

/// Sort candidates by descending path length in characters. The sort is
/// stable, so equal lengths keep traversal order.
pub fn removal_order(mut dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    dirs.sort_by_cached_key(|dir| Reverse(dir.to_string_lossy().chars().count()));
    dirs
}
