//! Errors raised while loading or validating notifier settings

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required settings file is missing
    #[error("Settings file not found: {0}")]
    FileNotFound(String),

    /// Settings were found but could not be turned into `Settings`
    #[error("Failed to parse settings: {0}")]
    ParseError(String),

    /// A setting is out of range or malformed
    #[error("Invalid setting {field}: {message}")]
    ValidationError { field: String, message: String },

    /// `STATUSES_APP_ENV` or another variable holds an unusable value
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// Two settings sources were requested that cannot be combined
    #[error("Conflicting settings sources: {0}")]
    MutualExclusivityError(String),

    /// Error reported by the `config` crate while merging sources
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }

    /// Dotted settings key the error is about, when known
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}
