//! Filesystem capability trait

use std::fs::Metadata;
use std::path::Path;

/// Filesystem primitives the janitor relies on.
///
/// Every method reports failures as `std::io::Error`; callers decide which
/// failures are recoverable for their operation.
pub trait FileEnv {
    /// Check whether a path exists, following symlinks
    fn exists(&self, path: &Path) -> bool;

    /// Metadata for the path itself, without following symlinks
    fn symlink_metadata(&self, path: &Path) -> std::io::Result<Metadata>;

    /// Whether a directory currently has no entries
    fn is_dir_empty(&self, path: &Path) -> std::io::Result<bool>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> std::io::Result<()>;

    /// Remove an empty directory
    fn remove_dir(&self, path: &Path) -> std::io::Result<()>;

    /// Remove a directory and all its contents
    fn remove_dir_all(&self, path: &Path) -> std::io::Result<()>;
}
