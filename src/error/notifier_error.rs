use crate::config::error::ConfigError;
use thiserror::Error;

/// Crate-wide error type.
///
/// Transport, status and render failures are the ones the notification path
/// can produce; the remaining variants cover configuration, persistence and
/// validation of administrative input.
#[derive(Error, Debug)]
pub enum NotifierError {
    /// Transport-level failure: DNS, TLS, connection refused, timeout
    #[error("Failed to reach {endpoint}: {source}")]
    Connectivity {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with something other than 200 during a connection test
    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus { status: u16 },

    /// The build outcome could not be turned into a status message
    #[error("Unable to render status message: {reason}")]
    Render { reason: String },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Reading or writing persisted notifier configuration failed
    #[error("Storage operation failed: {operation}")]
    Storage {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl NotifierError {
    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NotifierError::UnexpectedStatus { status } => Some(*status),
            NotifierError::Connectivity { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn render(reason: impl Into<String>) -> Self {
        NotifierError::Render {
            reason: reason.into(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        NotifierError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn storage(operation: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        NotifierError::Storage {
            operation: operation.into(),
            source: source.into(),
        }
    }
}

impl From<anyhow::Error> for NotifierError {
    fn from(error: anyhow::Error) -> Self {
        NotifierError::Internal { source: error }
    }
}

impl From<ConfigError> for NotifierError {
    fn from(error: ConfigError) -> Self {
        NotifierError::Configuration {
            key: error.field().unwrap_or("settings").to_string(),
            source: error.into(),
        }
    }
}

/// Type alias for Result with NotifierError to simplify function signatures
pub type NotifierResult<T> = Result<T, NotifierError>;
