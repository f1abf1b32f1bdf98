//! Command-line surface
//!
//! - Argument parsing structures
//! - Validation of user-supplied paths

pub mod args;
pub mod validation;

pub use args::Cli;
pub use validation::{validate_config_path, CliValidationError};
