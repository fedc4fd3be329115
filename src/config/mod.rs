//! Process settings for statuses-notifier
//!
//! Settings are layered, lowest priority first:
//! 1. `default.toml`
//! 2. `{environment}.toml` (selected by `STATUSES_APP_ENV`)
//! 3. `local.toml`
//! 4. `STATUSES_*` environment variables, `__` separating nested keys
//!
//! The notifier's administrative configuration (endpoint, credentials,
//! flags) is not part of these settings; see [`crate::repositories`].

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{HostConfig, HttpConfig, LoggerSettings, Settings, StoreConfig};
