//! Application configuration
//!
//! Everything the binary resolved from the command line and environment,
//! handed to the runtime in one value.

use crate::cli::Cli;
use crate::config::expand_tilde;
use crate::janitor::RunOptions;
use crate::state::default_state_path;
use anyhow::Result;
use std::path::PathBuf;

/// Application configuration structure
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    pub dry_run: bool,
    /// Validated job config file
    pub config_path: PathBuf,
    /// State document location
    pub state_path: PathBuf,
}

impl AppConfig {
    /// Build from parsed arguments and an already validated config path
    pub fn from_cli(cli: &Cli, config_path: PathBuf) -> Result<Self> {
        let state_path = match &cli.state_file {
            Some(path) => expand_tilde(path),
            None => default_state_path()?,
        };

        Ok(Self {
            verbose: cli.verbose,
            dry_run: cli.dry_run,
            config_path,
            state_path,
        })
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.dry_run,
            verbose: self.verbose >= 1,
        }
    }
}

pub(crate) fn log_level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
