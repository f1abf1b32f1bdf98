//! Persisted first-seen timestamps
//!
//! The janitor ages files by when it first observed them, not by filesystem
//! timestamps. Those observations live in a single JSON document:
//!
//! ```json
//! {
//!   "files": {
//!     "/data/tmp/a.txt": 1718000000.25
//!   }
//! }
//! ```
//!
//! - Keys are absolute file paths as discovered under a job root; see
//!   [`path_to_key`] for paths that are not valid UTF-8.
//! - Values are epoch seconds (floating point).
//! - A missing, unreadable or malformed document loads as an empty store. A
//!   malformed one is moved aside by [`StateStore::backup_malformed`].
//! - Saves go through a temp file in the same directory and a rename, so the
//!   document on disk is always a complete earlier snapshot.
//!
//! # Examples
//!
//! ```rust
//! use folder_janitor::state::StateStore;
//!
//! # fn example() -> anyhow::Result<()> {
//! let dir = tempfile::TempDir::new()?;
//! let mut store = StateStore::load(dir.path().join("state.json"));
//!
//! store.insert("/data/tmp/a.txt", 0.0);
//! store.save()?;
//!
//! let reloaded = StateStore::load(dir.path().join("state.json"));
//! assert_eq!(reloaded.get("/data/tmp/a.txt"), Some(0.0));
//! # Ok(())
//! # }
//! ```

pub mod key;
pub mod store;
#[cfg(test)]
mod tests;

pub use key::{key_to_path, path_to_key};
pub use store::{default_state_path, StateStore, FILES_KEY, STATE_FILE_NAME};
