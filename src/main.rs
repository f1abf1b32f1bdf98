use clap::Parser;
use folder_janitor::app::{self, AppConfig};
use folder_janitor::cli::{validate_config_path, Cli};

fn main() {
    let cli = Cli::parse();

    let config_path = match validate_config_path(&cli.config) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(e.exit_code());
        }
    };

    let app_config = match AppConfig::from_cli(&cli, config_path) {
        Ok(config) => config,
        Err(e) => app::handle_fatal_error(e, cli.verbose),
    };

    app::init_logging(&app_config);

    match app::run(&app_config) {
        Ok(code) => std::process::exit(code),
        Err(e) => app::handle_fatal_error(e, app_config.verbose),
    }
}
