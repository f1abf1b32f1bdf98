//! CLI argument structures

use clap::Parser;
use std::path::PathBuf;

/// Track when files were first seen and delete them after N days
#[derive(Parser, Debug)]
#[command(name = "folder-janitor")]
#[command(
    about = "Daily folder janitor: track first-seen time and delete after N days.",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Path to config.json
    #[arg(short, long, value_name = "PATH")]
    pub config: PathBuf,

    /// Do not delete; only report what would be deleted
    #[arg(long)]
    pub dry_run: bool,

    /// More output (-v for progress and debug logs, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// State document location (default: $XDG_STATE_HOME/folder-janitor/state.json)
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "folder-janitor",
            "--config",
            "/etc/janitor.json",
            "--dry-run",
            "-vv",
            "--state-file",
            "/tmp/state.json",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/janitor.json"));
        assert!(cli.dry_run);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.state_file, Some(PathBuf::from("/tmp/state.json")));
    }

    #[test]
    fn test_config_is_required() {
        assert!(Cli::try_parse_from(["folder-janitor", "--dry-run"]).is_err());
    }
}
