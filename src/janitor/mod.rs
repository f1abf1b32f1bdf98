//! Run orchestration
//!
//! One run: load state, prune vanished entries, process every job in config
//! order (files first, then empty directories), save state once.
//!
//! Only deletion failures affect the outcome; they are counted and turned
//! into a non-zero exit code after state has been saved.

use crate::config::{JanitorConfig, Job};
use crate::env::{FileEnv, RealFileEnv};
use crate::error::Result;
use crate::reclaim::Reclaimer;
use crate::retention::{Outcome, RetentionEngine};
use crate::state::StateStore;
use crate::walker::Walker;
use std::path::Path;
use tracing::{debug, info, warn};

pub mod report;

pub use report::RunSummary;

/// Switches for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Report only: no deletions, no rmdirs, aged-out entries kept.
    pub dry_run: bool,
    /// Print per-job progress lines.
    pub verbose: bool,
}

/// Drives the retention and reclaim passes over all configured jobs.
pub struct Janitor<E: FileEnv = RealFileEnv> {
    env: E,
    options: RunOptions,
}

impl Janitor<RealFileEnv> {
    pub fn new(options: RunOptions) -> Self {
        Self::with_env(RealFileEnv::new(), options)
    }
}

impl<E: FileEnv> Janitor<E> {
    pub fn with_env(env: E, options: RunOptions) -> Self {
        Self { env, options }
    }

    /// A complete run against the state document at `state_path`.
    ///
    /// Returns the counters; a save failure is the only error. A malformed
    /// document is moved aside before a live run. Dry runs leave it exactly as
    /// found and do not save over it.
    pub fn run(&self, config: &JanitorConfig, state_path: &Path, now: f64) -> Result<RunSummary> {
        let mut store = StateStore::load(state_path);
        if store.is_malformed() && !self.options.dry_run {
            store.backup_malformed();
        }
        store.prune_missing(&self.env);

        let summary = self.run_jobs(config, &mut store, now);
        if self.options.dry_run && store.is_malformed() {
            warn!(
                "Dry run: leaving malformed state file {} in place",
                store.path().display()
            );
        } else {
            store.save()?;
        }

        info!(
            seen = summary.seen,
            deleted = summary.deleted,
            rmdirs = summary.rmdirs,
            failed = summary.failed,
            "Run finished"
        );
        if self.options.verbose || self.options.dry_run {
            println!("{}", summary.done_line(store.path()));
        }

        Ok(summary)
    }

    /// Process every job against an already loaded and pruned store.
    pub fn run_jobs(&self, config: &JanitorConfig, store: &mut StateStore, now: f64) -> RunSummary {
        let mut summary = RunSummary::default();
        for job in config.iter() {
            if let Some(job_summary) = self.run_job(job, store, now) {
                summary.merge(&job_summary);
            }
        }
        summary
    }

    /// Process one job. `None` when the job root is missing or not a directory.
    pub fn run_job(&self, job: &Job, store: &mut StateStore, now: f64) -> Option<RunSummary> {
        let root = job.root();

        if !root.exists() {
            debug!("[{}] root missing: {}", job.name, root.display());
            eprintln!("[{}] skip (path not found): {}", job.name, root.display());
            return None;
        }
        if !root.is_dir() {
            debug!("[{}] root is not a directory: {}", job.name, root.display());
            eprintln!("[{}] skip (not a directory): {}", job.name, root.display());
            return None;
        }

        if self.options.verbose {
            println!("{}", report::scanning_line(job, &root));
        }
        debug!("[{}] scanning {}", job.name, root.display());

        let walker = Walker::new(&root, &job.exclusions);
        let mut summary = RunSummary::default();

        let engine = RetentionEngine::new(&self.env, now, self.options.dry_run);
        for path in walker.files() {
            summary.seen += 1;
            match engine.process(job, &path, store) {
                Outcome::Recorded => debug!("[{}] first seen: {}", job.name, path.display()),
                Outcome::Retained => {}
                Outcome::WouldDelete { age_days } => {
                    summary.deleted += 1;
                    println!("{}", report::dry_delete_line(&path, age_days, job.retention_days));
                }
                Outcome::Deleted { removal } => {
                    summary.deleted += 1;
                    debug!("[{}] removed {:?}: {}", job.name, removal, path.display());
                    println!("delete: {}", path.display());
                }
                Outcome::Failed { error } => {
                    summary.failed += 1;
                    debug!("[{}] failed to delete {}: {:?}", job.name, path.display(), error);
                    eprintln!("FAILED: {} (failed: {})", path.display(), error);
                }
            }
        }

        let reclaimer = Reclaimer::new(&self.env, self.options.dry_run);
        let removed = reclaimer.reclaim(&walker, |dir| {
            if self.options.dry_run {
                println!("[DRY] rmdir: {}", dir.display());
            } else if self.options.verbose {
                println!("rmdir: {}", dir.display());
            }
        });
        summary.rmdirs += removed;

        if self.options.verbose && removed > 0 {
            println!("[{}] removed empty dirs: {}", job.name, removed);
        }

        Some(summary)
    }
}
