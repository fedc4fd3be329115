//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{HostConfig, HttpConfig, LoggerSettings, Settings, StoreConfig};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Upper bound for any HTTP timeout; notifications must not hold a build step for long
const MAX_TIMEOUT_SECS: u64 = 300;

impl HttpConfig {
    /// Validate HTTP client configuration
    ///
    /// # Validation Rules
    /// - Timeouts must be between 1 and 300 seconds
    /// - Connect timeout must not exceed the request timeout
    /// - User agent must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout == 0 || self.request_timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::validation(
                "http.request_timeout",
                "Request timeout must be between 1 and 300 seconds.",
            ));
        }

        if self.connect_timeout == 0 || self.connect_timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::validation(
                "http.connect_timeout",
                "Connect timeout must be between 1 and 300 seconds.",
            ));
        }

        if self.connect_timeout > self.request_timeout {
            return Err(ConfigError::ValidationError {
                field: "http.connect_timeout".to_string(),
                message: format!(
                    "Connect timeout ({}) cannot exceed request timeout ({}).",
                    self.connect_timeout, self.request_timeout
                ),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::validation(
                "http.user_agent",
                "User agent cannot be empty.",
            ));
        }

        Ok(())
    }
}

impl StoreConfig {
    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "store.path",
                "Store path is required. Please specify where the notifier configuration is kept.",
            ));
        }
        Ok(())
    }
}

impl HostConfig {
    /// Validate host configuration
    ///
    /// # Validation Rules
    /// - base_url, when set, must be an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(base_url) = &self.base_url else {
            return Ok(());
        };

        let url = Url::parse(base_url).map_err(|e| ConfigError::ValidationError {
            field: "host.base_url".to_string(),
            message: format!("Invalid URL '{}': {}", base_url, e),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::validation(
                "host.base_url",
                "Base URL must use http or https protocol.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger configuration
    ///
    /// # Validation Rules
    /// - Level must be one of trace, debug, info, warn, error
    /// - Format must be one of full, compact, json
    /// - At least one output must be enabled
    /// - File path must not be empty when file output is enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        self.file.parse_format()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path cannot be empty when file output is enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// This method validates all sub-configurations and returns the first
    /// validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.http.validate()?;
        self.store.validate()?;
        self.host.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_http_config_zero_timeout() {
        let config = HttpConfig {
            request_timeout: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "http.request_timeout")
        );
    }

    #[test]
    fn test_http_config_connect_exceeds_request() {
        let config = HttpConfig {
            request_timeout: 5,
            connect_timeout: 10,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "http.connect_timeout")
        );
    }

    #[test]
    fn test_store_config_empty_path() {
        let config = StoreConfig {
            path: "  ".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_host_config_base_url() {
        assert!(HostConfig { base_url: None }.validate().is_ok());
        assert!(
            HostConfig {
                base_url: Some("https://ci.example.com/".to_string())
            }
            .validate()
            .is_ok()
        );
        assert!(
            HostConfig {
                base_url: Some("ci.example.com".to_string())
            }
            .validate()
            .is_err()
        );
        assert!(
            HostConfig {
                base_url: Some("ftp://ci.example.com/".to_string())
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_logger_settings_invalid_level() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "logger.level")
        );
    }

    #[test]
    fn test_logger_settings_no_output() {
        let mut settings = LoggerSettings::default();
        settings.console.enabled = false;
        settings.file.enabled = false;
        assert!(settings.validate().is_err());
    }
}
