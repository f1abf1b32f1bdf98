//! Run counters and report line formatting

use crate::config::Job;
use std::path::Path;

/// Counters accumulated across all jobs of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files discovered.
    pub seen: usize,
    /// Files deleted, or reported for deletion in a dry run.
    pub deleted: usize,
    /// Empty directories removed, or reported in a dry run.
    pub rmdirs: usize,
    /// Files that could not be deleted.
    pub failed: usize,
}

impl RunSummary {
    pub fn merge(&mut self, other: &RunSummary) {
        self.seen += other.seen;
        self.deleted += other.deleted;
        self.rmdirs += other.rmdirs;
        self.failed += other.failed;
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// 0 when every expired file was deleted, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn done_line(&self, state_path: &Path) -> String {
        format!(
            "done: seen={}, delete={}, rmdir={}, failed={}, state={}",
            self.seen,
            self.deleted,
            self.rmdirs,
            self.failed,
            state_path.display()
        )
    }
}

pub fn scanning_line(job: &Job, root: &Path) -> String {
    let exclusions: Vec<&str> = job.exclusions.iter().map(String::as_str).collect();
    format!(
        "[{}] scanning: {} (days={}, exceptions={:?})",
        job.name,
        root.display(),
        job.retention_days,
        exclusions
    )
}

pub fn dry_delete_line(path: &Path, age_days: f64, retention_days: u64) -> String {
    format!(
        "[DRY] delete: {}  (first_seen_age={:.2} days > {})",
        path.display(),
        age_days,
        retention_days
    )
}
