use super::{normalize, JanitorConfig};
use crate::error::{ErrorCode, ErrorExt, JanitorError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads and validates a job config file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, parse it as JSON and normalize it into jobs.
    pub fn load(&self) -> Result<JanitorConfig> {
        if !self.path.exists() {
            return Err(JanitorError::config_not_found(&self.path));
        }

        let content = fs::read_to_string(&self.path).to_config_error(
            ErrorCode::CONFIG_UNREADABLE,
            format!("Failed to read config file {}", self.path.display()),
        )?;

        let config = Self::parse(&content)?;
        debug!(
            "Loaded {} job(s) from {}",
            config.len(),
            self.path.display()
        );
        Ok(config)
    }

    /// Parse config text without touching the filesystem.
    pub fn parse(content: &str) -> Result<JanitorConfig> {
        let raw: serde_json::Value = serde_json::from_str(content)?;
        normalize(&raw)
    }
}
