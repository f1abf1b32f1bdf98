//! Input validation for CLI arguments

use crate::config::expand_tilde;
use std::path::{Path, PathBuf};

/// CLI validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum CliValidationError {
    ConfigFileNotFound(PathBuf),
}

impl std::fmt::Display for CliValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigFileNotFound(p) => write!(f, "Config file not found: {}", p.display()),
        }
    }
}

impl std::error::Error for CliValidationError {}

impl CliValidationError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigFileNotFound(_) => 2,
        }
    }
}

/// Expand `~` in the config path and check that it exists.
pub fn validate_config_path(path: &Path) -> Result<PathBuf, CliValidationError> {
    let expanded = expand_tilde(path);
    if !expanded.exists() {
        return Err(CliValidationError::ConfigFileNotFound(expanded));
    }
    Ok(expanded)
}
