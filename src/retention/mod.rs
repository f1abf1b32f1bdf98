//! First-seen based retention decisions
//!
//! A file is aged from the moment this tool first recorded it. The rules per
//! discovered path:
//!
//! 1. No state entry: record it as seen now. Never deleted on first sighting,
//!    even with a zero-day retention.
//! 2. Entry older than the retention period (`first_seen <= now - days * 86400`):
//!    expired. Dry runs only report it; live runs delete it and drop the entry
//!    on success, or keep the entry on failure so the next run retries.
//! 3. Otherwise: untouched.

use crate::config::Job;
use crate::env::FileEnv;
use crate::state::{path_to_key, StateStore};
use std::path::Path;
use tracing::debug;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// What the rules say about one file, before any side effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Not tracked yet.
    NewlySeen,
    /// Tracked, still within its retention period.
    Retained,
    /// Tracked for at least the retention period.
    Expired { age_days: f64 },
}

/// Classify a file from its first-seen timestamp.
pub fn evaluate(first_seen: Option<f64>, now: f64, retention_days: u64) -> Verdict {
    let Some(first_seen) = first_seen else {
        return Verdict::NewlySeen;
    };

    let cutoff = now - retention_days as f64 * SECONDS_PER_DAY;
    if first_seen <= cutoff {
        Verdict::Expired {
            age_days: (now - first_seen) / SECONDS_PER_DAY,
        }
    } else {
        Verdict::Retained
    }
}

/// How an expired path was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    File,
    /// The path had become a directory and was removed recursively.
    Directory,
}

/// Delete `path`, falling back to a recursive removal if it turned into a
/// directory after it was discovered.
///
/// The fallback also fires for a path that was a directory all along; the
/// walker only yields regular files, so that should not happen in practice.
pub fn delete_path<E: FileEnv>(env: &E, path: &Path) -> std::io::Result<Removal> {
    match env.remove_file(path) {
        Ok(()) => Ok(Removal::File),
        Err(err) => {
            let is_dir = env
                .symlink_metadata(path)
                .map(|meta| meta.file_type().is_dir())
                .unwrap_or(false);
            if !is_dir {
                return Err(err);
            }
            debug!("{} became a directory, removing recursively", path.display());
            env.remove_dir_all(path)?;
            Ok(Removal::Directory)
        }
    }
}

/// Result of processing one discovered file.
#[derive(Debug)]
pub enum Outcome {
    /// First sighting, entry created.
    Recorded,
    /// Within retention, nothing done.
    Retained,
    /// Dry run: would be deleted. State untouched.
    WouldDelete { age_days: f64 },
    Deleted { removal: Removal },
    /// Deletion failed; the entry stays for a retry next run.
    Failed { error: std::io::Error },
}

/// Applies [`evaluate`] to discovered files of one job.
pub struct RetentionEngine<'a, E: FileEnv> {
    env: &'a E,
    now: f64,
    dry_run: bool,
}

impl<'a, E: FileEnv> RetentionEngine<'a, E> {
    pub fn new(env: &'a E, now: f64, dry_run: bool) -> Self {
        Self { env, now, dry_run }
    }

    pub fn process(&self, job: &Job, path: &Path, store: &mut StateStore) -> Outcome {
        let key = path_to_key(path);

        match evaluate(store.get(&key), self.now, job.retention_days) {
            Verdict::NewlySeen => {
                store.insert(key, self.now);
                Outcome::Recorded
            }
            Verdict::Retained => Outcome::Retained,
            Verdict::Expired { age_days } if self.dry_run => Outcome::WouldDelete { age_days },
            Verdict::Expired { .. } => match delete_path(self.env, path) {
                Ok(removal) => {
                    store.remove(&key);
                    Outcome::Deleted { removal }
                }
                Err(error) => Outcome::Failed { error },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FailingFileEnv, RealFileEnv};
    use std::collections::BTreeSet;
    use std::fs;
    use tempfile::TempDir;

    const NOW: f64 = 1_700_000_000.0;

    fn job(days: u64) -> Job {
        Job {
            name: "test".to_string(),
            path: "/unused".to_string(),
            retention_days: days,
            exclusions: BTreeSet::new(),
        }
    }

    fn store(dir: &TempDir) -> StateStore {
        StateStore::empty(dir.path().join("state.json"))
    }

    #[test]
    fn test_age_threshold_boundaries() {
        let days = 3;
        let threshold = days as f64 * SECONDS_PER_DAY;

        assert!(matches!(
            evaluate(Some(NOW - threshold - 1.0), NOW, days),
            Verdict::Expired { .. }
        ));
        assert!(matches!(
            evaluate(Some(NOW - threshold), NOW, days),
            Verdict::Expired { .. }
        ));
        assert_eq!(evaluate(Some(NOW - threshold + 1.0), NOW, days), Verdict::Retained);
        assert_eq!(evaluate(None, NOW, days), Verdict::NewlySeen);
    }

    #[test]
    fn test_expired_reports_age_in_days() {
        match evaluate(Some(NOW - 2.5 * SECONDS_PER_DAY), NOW, 1) {
            Verdict::Expired { age_days } => assert!((age_days - 2.5).abs() < 1e-9),
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn test_zero_days_still_requires_prior_sighting() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        let mut store = store(&temp_dir);
        let env = RealFileEnv::new();
        let engine = RetentionEngine::new(&env, NOW, false);

        assert!(matches!(engine.process(&job(0), &file, &mut store), Outcome::Recorded));
        assert!(file.exists());
        assert_eq!(store.get(file.to_str().unwrap()), Some(NOW));

        // Seen in the same instant again: zero days means already expired.
        assert!(matches!(
            engine.process(&job(0), &file, &mut store),
            Outcome::Deleted { removal: Removal::File }
        ));
        assert!(!file.exists());
        assert!(store.is_empty());
    }

    #[test]
    fn test_retained_file_is_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        let mut store = store(&temp_dir);
        store.insert(file.to_str().unwrap(), NOW - 10.0);

        let env = RealFileEnv::new();
        let outcome = RetentionEngine::new(&env, NOW, false).process(&job(1), &file, &mut store);

        assert!(matches!(outcome, Outcome::Retained));
        assert!(file.exists());
        assert_eq!(store.get(file.to_str().unwrap()), Some(NOW - 10.0));
    }

    #[test]
    fn test_dry_run_leaves_file_and_state() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.txt");
        fs::write(&file, "x").unwrap();
        let mut store = store(&temp_dir);
        let first_seen = NOW - 5.0 * SECONDS_PER_DAY;
        store.insert(file.to_str().unwrap(), first_seen);

        let env = RealFileEnv::new();
        let engine = RetentionEngine::new(&env, NOW, true);

        for _ in 0..2 {
            let outcome = engine.process(&job(1), &file, &mut store);
            assert!(matches!(outcome, Outcome::WouldDelete { .. }));
        }
        assert!(file.exists());
        assert_eq!(store.get(file.to_str().unwrap()), Some(first_seen));
    }

    #[test]
    fn test_failed_deletion_keeps_entry() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("locked.bin");
        fs::write(&file, "x").unwrap();
        let mut store = store(&temp_dir);
        store.insert(file.to_str().unwrap(), 0.0);

        let env = FailingFileEnv::new().deny(&file);
        let outcome = RetentionEngine::new(&env, NOW, false).process(&job(1), &file, &mut store);

        match outcome {
            Outcome::Failed { error } => {
                assert_eq!(error.kind(), std::io::ErrorKind::PermissionDenied)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(file.exists());
        assert_eq!(store.get(file.to_str().unwrap()), Some(0.0));
    }

    #[test]
    fn test_delete_path_falls_back_to_recursive_removal() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("was-a-file");
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("inner/x"), "x").unwrap();

        let removal = delete_path(&RealFileEnv::new(), &dir).unwrap();

        assert_eq!(removal, Removal::Directory);
        assert!(!dir.exists());
    }

    #[test]
    fn test_delete_path_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = delete_path(&RealFileEnv::new(), &temp_dir.path().join("nope")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
