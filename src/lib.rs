//! # folder-janitor
//!
//! A recurring filesystem janitor. For each configured directory root it
//! remembers when every file was first observed and deletes files that have
//! been present longer than the root's retention period, then removes
//! directories left empty.
//!
//! ## Usage
//!
//! ```bash
//! folder-janitor --config ~/.config/folder-janitor/config.json [--dry-run] [-v]
//! ```
//!
//! ## Modules
//!
//! - `app` - Logging setup, runtime wiring and fatal error handling
//! - `cli` - Argument parsing and validation
//! - `config` - Job config loading and normalization
//! - `env` - Filesystem abstraction used by the mutating passes
//! - `error` - Typed fatal errors and error codes
//! - `janitor` - Run orchestration and counters
//! - `reclaim` - Empty-directory removal
//! - `retention` - First-seen based deletion decisions
//! - `state` - Persisted first-seen timestamps
//! - `walker` - Exclusion-aware traversal
pub mod app;
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod janitor;
pub mod reclaim;
pub mod retention;
pub mod state;
pub mod walker;

pub use config::{JanitorConfig, Job};
pub use error::{JanitorError, Result};
pub use janitor::{Janitor, RunOptions, RunSummary};
pub use state::StateStore;
