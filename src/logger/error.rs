//! Errors raised while setting up log outputs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Unable to open log file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid logger configuration: {message}")]
    Config { message: String },
}

impl LoggerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
