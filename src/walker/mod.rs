//! Exclusion-aware directory traversal
//!
//! Both the retention pass and the empty-directory pass see the tree through
//! the same rules:
//!
//! - Traversal is top-down and never follows symlinks (other than the root).
//! - A directory whose base name is excluded is pruned before descent, so
//!   nothing beneath it is ever read.
//! - Entries that cannot be read, or vanish mid-scan, are skipped silently.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::{DirEntry, WalkDir};

/// Traversal of one job root.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
    root: &'a Path,
    exclusions: &'a BTreeSet<String>,
}

impl<'a> Walker<'a> {
    pub fn new(root: &'a Path, exclusions: &'a BTreeSet<String>) -> Self {
        Self { root, exclusions }
    }

    /// Regular, non-symlink files under the root, in traversal order.
    ///
    /// Each call performs a fresh traversal.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + 'a {
        self.entries()
            .filter(|entry| entry.file_type().is_file())
            .map(DirEntry::into_path)
            .filter(|path| is_live_regular_file(path))
    }

    /// Every traversed directory under the root, excluding the root itself.
    pub fn dirs(&self) -> impl Iterator<Item = PathBuf> + 'a {
        self.entries()
            .filter(|entry| entry.depth() > 0 && entry.file_type().is_dir())
            .map(DirEntry::into_path)
    }

    fn entries(&self) -> impl Iterator<Item = DirEntry> + 'a {
        let exclusions = self.exclusions;
        WalkDir::new(self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| !is_excluded(entry, exclusions))
            .filter_map(|res| match res {
                Ok(entry) => Some(entry),
                Err(e) => {
                    trace!("Skipping unreadable entry: {}", e);
                    None
                }
            })
    }
}

fn is_excluded(entry: &DirEntry, exclusions: &BTreeSet<String>) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclusions.contains(name))
}

/// Re-check the entry right before handing it out; it may have been removed
/// or replaced since the directory was listed.
fn is_live_regular_file(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.file_type().is_file())
        .unwrap_or(false)
}
