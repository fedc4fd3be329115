//! Process settings for the `statuses` binary.
//!
//! Only process-level concerns live here (HTTP client tuning, where the
//! notifier configuration is stored, host facts, logging). The notifier's
//! endpoint, credentials and flags are administrative data kept by the
//! configuration store named in `[store]`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

mod defaults {
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
    pub const POOL_MAX_IDLE_PER_HOST: usize = 4;
    pub const STORE_PATH: &str = "data/notifier.toml";
    pub const LOG_LEVEL: &str = "info";
    pub const LOG_PATH: &str = "logs/statuses.log";
    pub const LOG_FORMAT: &str = "json";

    pub fn app_name() -> String {
        "statuses-notifier".to_string()
    }

    pub fn app_version() -> String {
        crate::pkg_version().to_string()
    }

    pub fn request_timeout() -> u64 {
        REQUEST_TIMEOUT_SECS
    }

    pub fn connect_timeout() -> u64 {
        CONNECT_TIMEOUT_SECS
    }

    pub fn pool_max_idle_per_host() -> usize {
        POOL_MAX_IDLE_PER_HOST
    }

    pub fn user_agent() -> String {
        format!("statuses-notifier/{}", crate::pkg_version())
    }

    pub fn store_path() -> String {
        STORE_PATH.to_string()
    }

    pub fn log_level() -> String {
        LOG_LEVEL.to_string()
    }

    pub fn log_path() -> String {
        LOG_PATH.to_string()
    }

    pub fn log_format() -> String {
        LOG_FORMAT.to_string()
    }

    pub fn enabled() -> bool {
        true
    }
}

/// `[application]`: name and version reported in logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "defaults::app_name")]
    pub name: String,

    /// Defaults to the crate version baked in at build time
    #[serde(default = "defaults::app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: defaults::app_name(),
            version: defaults::app_version(),
        }
    }
}

/// `[http]`: outbound client used for the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout, seconds
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout: u64,

    /// TCP/TLS connect timeout, seconds
    #[serde(default = "defaults::connect_timeout")]
    pub connect_timeout: u64,

    #[serde(default = "defaults::pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,

    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: defaults::request_timeout(),
            connect_timeout: defaults::connect_timeout(),
            pool_max_idle_per_host: defaults::pool_max_idle_per_host(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// `[store]`: location of the persisted notifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "defaults::store_path")]
    pub path: String,
}

impl StoreConfig {
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: defaults::store_path(),
        }
    }
}

/// `[host]`: facts about the CI host the notifier runs in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Externally visible base URL, offered when the stored notifier
    /// configuration has none yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// `[logger.console]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    #[serde(default = "defaults::enabled")]
    pub enabled: bool,

    /// ANSI colors, only applied when stderr is a terminal
    #[serde(default = "defaults::enabled")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

/// `[logger.file]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "defaults::log_path")]
    pub path: String,

    /// Keep existing log contents on start instead of truncating
    #[serde(default = "defaults::enabled")]
    pub append: bool,

    /// One of `full`, `compact`, `json`
    #[serde(default = "defaults::log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: defaults::log_path(),
            append: true,
            format: defaults::log_format(),
        }
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;
        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format)
            .map_err(|e| ConfigError::validation("logger.file".to_string(), e.to_string()))
    }

    pub(crate) fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format".to_string(), e.to_string()))
    }
}

/// `[logger]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// `trace`, `debug`, `info`, `warn` or `error`
    #[serde(default = "defaults::log_level")]
    pub level: String,

    #[serde(default)]
    pub console: ConsoleSettings,

    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Runtime logger configuration for `logger::init_logger`
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger".to_string(), e.to_string()))
    }
}

/// All process settings; every section is optional in the sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub logger: LoggerSettings,
}
