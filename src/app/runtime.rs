//! Runtime wiring: config file to finished run

use crate::app::config::AppConfig;
use crate::config::ConfigLoader;
use crate::janitor::Janitor;
use anyhow::Result;
use chrono::Utc;
use tracing::debug;

/// Current wall-clock time as epoch seconds.
pub fn epoch_now() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// Load the job config, run every job and return the process exit code.
///
/// Errors are fatal: an invalid config (before anything is touched) or a
/// state document that could not be saved.
pub fn run(app: &AppConfig) -> Result<i32> {
    let config = ConfigLoader::new(&app.config_path).load()?;
    debug!("Running {} job(s)", config.len());

    let janitor = Janitor::new(app.run_options());
    let summary = janitor.run(&config, &app.state_path, epoch_now())?;

    Ok(summary.exit_code())
}
