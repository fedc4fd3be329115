//! Deployment environment selecting the `{environment}.toml` settings layer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl Environment {
    pub const ENV_VAR: &'static str = "STATUSES_APP_ENV";

    /// Read `STATUSES_APP_ENV`, falling back to `Development` when unset or unknown
    pub fn from_env() -> Self {
        match std::env::var(Self::ENV_VAR) {
            Ok(raw) => raw.parse().unwrap_or_else(|err: ConfigError| {
                tracing::warn!(error = %err, "Ignoring {}", Self::ENV_VAR);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::EnvVarError(format!(
                "{} must be one of development, test, production (got '{}')",
                Self::ENV_VAR,
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
