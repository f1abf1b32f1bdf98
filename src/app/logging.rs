//! Logging configuration and initialization

use crate::app::config::{log_level_for, AppConfig};
use tracing::{debug, trace};

/// Initialize tracing/logging for the application
pub fn init_logging(config: &AppConfig) {
    init_tracing(config.verbose);
    debug!(
        "config={} state={} dry_run={}",
        config.config_path.display(),
        config.state_path.display(),
        config.dry_run
    );
}

/// Initialize tracing from a verbosity level alone
pub fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(log_level_for(verbose))
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2) // Show target module for -vv and above
        .with_line_number(verbose >= 2)
        .init();

    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
