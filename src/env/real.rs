//! Real filesystem implementation backed by `std::fs`

use super::traits::FileEnv;
use std::fs::{self, Metadata};
use std::path::Path;

/// Delegates all operations to the standard library's `std::fs` module.
#[derive(Debug, Clone, Default)]
pub struct RealFileEnv;

impl RealFileEnv {
    pub fn new() -> Self {
        Self
    }
}

impl FileEnv for RealFileEnv {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn symlink_metadata(&self, path: &Path) -> std::io::Result<Metadata> {
        fs::symlink_metadata(path)
    }

    fn is_dir_empty(&self, path: &Path) -> std::io::Result<bool> {
        Ok(fs::read_dir(path)?.next().is_none())
    }

    fn remove_file(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_file(path)
    }

    fn remove_dir(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_dir(path)
    }

    fn remove_dir_all(&self, path: &Path) -> std::io::Result<()> {
        fs::remove_dir_all(path)
    }
}
