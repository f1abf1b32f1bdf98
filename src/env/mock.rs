//! Test double that injects deletion failures

use super::real::RealFileEnv;
use super::traits::FileEnv;
use std::collections::HashSet;
use std::fs::Metadata;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

/// Real filesystem with a deny-list.
///
/// Removal of any denied path fails with `PermissionDenied`, regardless of
/// the privileges of the process running the tests.
///
/// ```
/// use folder_janitor::env::{FailingFileEnv, FileEnv};
/// use std::path::Path;
///
/// let env = FailingFileEnv::new().deny("/srv/locked.bin");
/// let err = env.remove_file(Path::new("/srv/locked.bin")).unwrap_err();
/// assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FailingFileEnv {
    inner: RealFileEnv,
    denied: HashSet<PathBuf>,
}

impl FailingFileEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make removal of `path` fail
    pub fn deny(mut self, path: impl Into<PathBuf>) -> Self {
        self.denied.insert(path.into());
        self
    }

    fn check(&self, path: &Path) -> std::io::Result<()> {
        if self.denied.contains(path) {
            return Err(Error::new(
                ErrorKind::PermissionDenied,
                format!("Permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

impl FileEnv for FailingFileEnv {
    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn symlink_metadata(&self, path: &Path) -> std::io::Result<Metadata> {
        self.inner.symlink_metadata(path)
    }

    fn is_dir_empty(&self, path: &Path) -> std::io::Result<bool> {
        self.inner.is_dir_empty(path)
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        self.check(path)?;
        self.inner.remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> std::io::Result<()> {
        self.check(path)?;
        self.inner.remove_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> std::io::Result<()> {
        self.check(path)?;
        self.inner.remove_dir_all(path)
    }
}
