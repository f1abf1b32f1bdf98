//! JSON-backed state store

use super::key::key_to_path;
use crate::env::FileEnv;
use crate::error::{ErrorCode, ErrorExt, JanitorError, Result};
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Top-level key holding the path -> first-seen mapping.
pub const FILES_KEY: &str = "files";

pub const STATE_FILE_NAME: &str = "state.json";

const STATE_DIR_NAME: &str = "folder-janitor";

/// Default state document location.
///
/// `$XDG_STATE_HOME/folder-janitor/state.json`, falling back to
/// `~/.local/state/folder-janitor/state.json`.
pub fn default_state_path() -> Result<PathBuf> {
    let base = std::env::var_os("XDG_STATE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
        .ok_or_else(|| {
            JanitorError::storage_with_code(
                ErrorCode::STORAGE_PATH_UNRESOLVED,
                "Could not determine home directory for the state file",
                None,
            )
        })?;

    Ok(base.join(STATE_DIR_NAME).join(STATE_FILE_NAME))
}

/// First-seen timestamps for every tracked file.
///
/// Owned by a single run: loaded once, mutated in place, saved once.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
    files: BTreeMap<String, f64>,
    /// Unknown top-level keys, written back untouched.
    extra: Map<String, Value>,
    /// The document on disk could not be understood.
    malformed: bool,
}

impl StateStore {
    /// An empty store that will save to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            files: BTreeMap::new(),
            extra: Map::new(),
            malformed: false,
        }
    }

    /// Load the store from `path`.
    ///
    /// Never fails: an absent, unreadable or malformed document yields an
    /// empty store. Loading never touches the file; a malformed document is
    /// only flagged, see [`backup_malformed`](Self::backup_malformed).
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if !path.exists() {
            debug!("No state file at {}, starting empty", path.display());
            return Self::empty(path);
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Cannot read state file {}: {}", path.display(), e);
                return Self::empty(path);
            }
        };

        match Self::parse(&contents) {
            Some((files, extra)) => {
                debug!("Loaded {} tracked file(s) from {}", files.len(), path.display());
                Self {
                    path,
                    files,
                    extra,
                    malformed: false,
                }
            }
            None => {
                warn!("State file {} is malformed, starting empty", path.display());
                Self {
                    malformed: true,
                    ..Self::empty(path)
                }
            }
        }
    }

    /// Parse a state document. `None` means the document is malformed.
    fn parse(contents: &str) -> Option<(BTreeMap<String, f64>, Map<String, Value>)> {
        let Ok(Value::Object(mut doc)) = serde_json::from_str::<Value>(contents) else {
            return None;
        };
        let Some(Value::Object(raw_files)) = doc.remove(FILES_KEY) else {
            return None;
        };

        let mut files = BTreeMap::new();
        for (key, value) in raw_files {
            match value.as_f64() {
                Some(first_seen) => {
                    files.insert(key, first_seen);
                }
                None => warn!("Dropping state entry with non-numeric timestamp: {}", key),
            }
        }

        Some((files, doc))
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// Move a malformed document aside to `state.json.corrupted.<timestamp>`.
    ///
    /// No-op unless [`load`](Self::load) flagged the document. Returns the
    /// backup location on success.
    pub fn backup_malformed(&mut self) -> Option<PathBuf> {
        if !self.malformed {
            return None;
        }

        let mut backup = self.path.as_os_str().to_owned();
        backup.push(format!(".corrupted.{}", Utc::now().timestamp()));
        let backup = PathBuf::from(backup);

        match fs::rename(&self.path, &backup) {
            Ok(()) => {
                warn!(
                    "Backed up malformed state file {} to {}",
                    self.path.display(),
                    backup.display()
                );
                self.malformed = false;
                Some(backup)
            }
            Err(e) => {
                warn!(
                    "Malformed state file {} could not be backed up: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Where [`save`](Self::save) writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.files.get(key).copied()
    }

    /// Record `key` as first seen at `first_seen`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, first_seen: f64) {
        self.files.insert(key.into(), first_seen);
    }

    pub fn remove(&mut self, key: &str) -> Option<f64> {
        self.files.remove(key)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drop every entry whose path no longer exists. Returns how many were dropped.
    pub fn prune_missing<E: FileEnv>(&mut self, env: &E) -> usize {
        let before = self.files.len();
        self.files.retain(|key, _| env.exists(&key_to_path(key)));
        let pruned = before - self.files.len();
        if pruned > 0 {
            debug!("Pruned {} state entr(ies) for vanished paths", pruned);
        }
        pruned
    }

    /// Serialize the document: sorted keys, two-space indent, trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut doc: BTreeMap<&str, Value> = self
            .extra
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        let files = serde_json::to_value(&self.files).map_err(|e| {
            JanitorError::storage_with_code(
                ErrorCode::STORAGE_SERIALIZATION_ERROR,
                "Failed to serialize state",
                Some(self.path.clone()),
            )
            .with_source(e)
        })?;
        doc.insert(FILES_KEY, files);

        let mut json = serde_json::to_string_pretty(&doc).map_err(|e| {
            JanitorError::storage_with_code(
                ErrorCode::STORAGE_SERIALIZATION_ERROR,
                "Failed to serialize state",
                Some(self.path.clone()),
            )
            .with_source(e)
        })?;
        json.push('\n');
        Ok(json)
    }

    /// Atomically replace the document on disk.
    pub fn save(&self) -> Result<()> {
        let json = self.to_json()?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .to_storage_error(&self.path, "Failed to create state directory")?;

        let mut temp_file = NamedTempFile::new_in(&parent)
            .to_storage_error(&self.path, "Failed to create temp state file")?;
        temp_file
            .write_all(json.as_bytes())
            .to_storage_error(&self.path, "Failed to write temp state file")?;
        temp_file
            .as_file()
            .sync_all()
            .to_storage_error(&self.path, "Failed to flush temp state file")?;
        temp_file
            .persist(&self.path)
            .to_storage_error(&self.path, "Failed to replace state file")?;

        debug!(
            "Saved {} tracked file(s) to {}",
            self.files.len(),
            self.path.display()
        );
        Ok(())
    }
}
