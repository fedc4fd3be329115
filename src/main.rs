use std::process::ExitCode;

use clap::Parser;
use statuses_notifier::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let settings = match cli::load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    cli::init_logger_from_settings(&settings, &cli)?;
    tracing::debug!(
        app = %settings.application.name,
        version = %settings.application.version,
        build = statuses_notifier::pkg_version(),
        store = %settings.store.path,
        "Starting statuses"
    );

    let descriptor = cli::build_descriptor(&settings)?;
    match cli::execute_command(&cli, descriptor).await {
        Ok(true) => Ok(ExitCode::SUCCESS),
        Ok(false) => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
