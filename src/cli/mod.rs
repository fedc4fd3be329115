//! CLI module for statuses-notifier
//!
//! - Argument parsing with clap
//! - Settings loading and logger setup driven by global flags
//! - Command execution through per-command handlers

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use executor::execute_command;
pub use parser::{Cli, Commands, ConnectionArgs, Environment};

use std::sync::Arc;

use tracing::Level;

use crate::config::{ConfigError, ConfigLoader, Settings};
use crate::error::NotifierResult;
use crate::external::build_http_client;
use crate::logger::init_logger;
use crate::repositories::TomlFileStore;
use crate::services::NotifierDescriptor;
use crate::services::notifications::StaticBaseUrl;

/// Load settings from `--config` or the layered `config/` directory
///
/// # Errors
/// Returns error if settings cannot be found, parsed or validated
pub fn load_settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::from_file(path),
        None => ConfigLoader::new()?,
    };
    let loader = match cli.env {
        Some(env) => loader.with_environment(env.into()),
        None => loader,
    };
    loader.load()
}

/// Initialize logging, applying `--verbose` / `--quiet` on top of settings
pub fn init_logger_from_settings(settings: &Settings, cli: &Cli) -> anyhow::Result<()> {
    let mut logger_config = settings.logger.clone().into_logger_config()?;
    if cli.verbose {
        logger_config = logger_config.with_level(Level::DEBUG);
    } else if cli.quiet {
        logger_config = logger_config.with_level(Level::ERROR);
    }
    init_logger(logger_config)
}

/// Wire the notifier to its file store, HTTP client and host base URL
pub fn build_descriptor(settings: &Settings) -> NotifierResult<Arc<NotifierDescriptor>> {
    let client = build_http_client(&settings.http)?;
    let store = Arc::new(TomlFileStore::new(settings.store.path_buf()));
    let base_url = Arc::new(StaticBaseUrl::new(settings.host.base_url.clone()));

    Ok(Arc::new(NotifierDescriptor::load(store, base_url, client)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_settings_from_config_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[store]\npath = \"/tmp/statuses/notifier.toml\"\n").unwrap();

        let cli = Cli::try_parse_from(["statuses", "--config", path.to_str().unwrap(), "show"]).unwrap();
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.store.path, "/tmp/statuses/notifier.toml");
    }

    #[test]
    fn test_build_descriptor_reads_store() {
        let dir = TempDir::new().unwrap();
        let store_path = dir.path().join("notifier.toml");
        fs::write(
            &store_path,
            "endpoint_url = \"https://status.example.com/api\"\nrecipients_label = \"@team\"\n",
        )
        .unwrap();

        let mut settings = Settings::default();
        settings.store.path = store_path.to_string_lossy().into_owned();
        settings.host.base_url = Some("https://ci.example.com/".to_string());

        let descriptor = build_descriptor(&settings).unwrap();
        let config = descriptor.snapshot();
        assert_eq!(config.endpoint_url, "https://status.example.com/api");
        assert_eq!(config.recipients_label, "@team");
        assert!(config.only_on_failure_or_recovery);
        assert_eq!(
            descriptor.ensure_base_url().as_deref(),
            Some("https://ci.example.com/")
        );
    }

    #[test]
    fn test_build_descriptor_without_store_file() {
        let dir = TempDir::new().unwrap();
        let mut settings = Settings::default();
        settings.store.path = dir.path().join("missing/notifier.toml").to_string_lossy().into_owned();

        let descriptor = build_descriptor(&settings).unwrap();
        assert_eq!(descriptor.snapshot(), crate::models::NotifierConfig::default());
    }
}
