//! Filesystem abstraction for the mutating side of a run
//!
//! The retention engine and the empty-directory reclaimer never call
//! `std::fs` directly; they go through a [`FileEnv`]. Production code uses
//! [`RealFileEnv`], tests can swap in [`FailingFileEnv`] to make chosen paths
//! refuse deletion.
//!
//! ```
//! use folder_janitor::env::{FileEnv, RealFileEnv};
//! use std::path::Path;
//!
//! let env = RealFileEnv::new();
//! assert!(!env.exists(Path::new("/definitely/not/here")));
//! ```

pub mod mock;
pub mod real;
pub mod traits;

pub use mock::FailingFileEnv;
pub use real::RealFileEnv;
pub use traits::FileEnv;
