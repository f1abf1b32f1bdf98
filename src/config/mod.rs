//! Job configuration
//!
//! The config document is a JSON object mapping job names to settings:
//!
//! ```json
//! {
//!   "downloads": { "path": "~/Downloads", "days": 30, "Exceptions": ["keep"] },
//!   "tmp": { "path": "/data/tmp", "days": 1 }
//! }
//! ```
//!
//! [`normalize`] validates that document and turns it into an ordered list of
//! [`Job`]s. Job order is the order of keys in the file.

use crate::error::{ErrorCode, JanitorError, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub mod loader;

pub use loader::ConfigLoader;

/// Settings key holding the list of excluded directory names.
pub const EXCLUSIONS_KEY: &str = "Exceptions";

/// One named retention policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    /// Root as written in the config; see [`Job::root`] for the expanded form.
    pub path: String,
    pub retention_days: u64,
    /// Directory base names that are never traversed.
    pub exclusions: BTreeSet<String>,
}

impl Job {
    /// Root directory with a leading `~` expanded, made absolute against the
    /// working directory so state keys are always absolute paths.
    pub fn root(&self) -> PathBuf {
        let expanded = expand_tilde(&self.path);
        std::path::absolute(&expanded).unwrap_or(expanded)
    }
}

/// Validated configuration: jobs in config order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JanitorConfig {
    pub jobs: Vec<Job>,
}

impl JanitorConfig {
    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Validate a raw config document and normalize it into jobs.
pub fn normalize(raw: &Value) -> Result<JanitorConfig> {
    let entries = match raw.as_object() {
        Some(map) if !map.is_empty() => map,
        _ => {
            return Err(JanitorError::config_with_code(
                ErrorCode::CONFIG_EMPTY,
                "Config must be a non-empty JSON object mapping names -> settings objects.",
            ))
        }
    };

    let jobs = entries
        .iter()
        .map(|(name, settings)| normalize_job(name, settings))
        .collect::<Result<Vec<_>>>()?;

    Ok(JanitorConfig { jobs })
}

fn normalize_job(name: &str, settings: &Value) -> Result<Job> {
    let settings = settings.as_object().ok_or_else(|| {
        JanitorError::Config {
            code: ErrorCode::CONFIG_INVALID_VALUE,
            message: format!("Config entry \"{}\" must be an object.", name),
            job: Some(name.to_string()),
            field: None,
            source: None,
        }
    })?;

    let path = match settings.get("path") {
        Some(Value::String(p)) if !p.trim().is_empty() => p.clone(),
        Some(_) => {
            return Err(JanitorError::invalid_job_field(
                ErrorCode::CONFIG_INVALID_VALUE,
                name,
                "path",
                "must be a non-empty string.",
            ))
        }
        None => {
            return Err(JanitorError::invalid_job_field(
                ErrorCode::CONFIG_MISSING_REQUIRED,
                name,
                "path",
                "must be a non-empty string.",
            ))
        }
    };

    // `as_u64` rejects negatives, floats and booleans alike.
    let retention_days = match settings.get("days") {
        Some(days) => days.as_u64().ok_or_else(|| {
            JanitorError::invalid_job_field(
                ErrorCode::CONFIG_INVALID_VALUE,
                name,
                "days",
                "must be a non-negative integer.",
            )
        })?,
        None => {
            return Err(JanitorError::invalid_job_field(
                ErrorCode::CONFIG_MISSING_REQUIRED,
                name,
                "days",
                "must be a non-negative integer.",
            ))
        }
    };

    let exclusions = match settings.get(EXCLUSIONS_KEY) {
        None | Some(Value::Null) => BTreeSet::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<BTreeSet<_>>>()
            .ok_or_else(|| exclusions_error(name))?,
        Some(_) => return Err(exclusions_error(name)),
    };

    Ok(Job {
        name: name.to_string(),
        path,
        retention_days,
        exclusions,
    })
}

fn exclusions_error(job: &str) -> JanitorError {
    JanitorError::invalid_job_field(
        ErrorCode::CONFIG_INVALID_VALUE,
        job,
        EXCLUSIONS_KEY,
        "must be a list of strings.",
    )
}

/// Expand a leading `~` or `~/` to the user's home directory.
///
/// Paths without a leading tilde, or when no home directory is known, are
/// returned unchanged.
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
