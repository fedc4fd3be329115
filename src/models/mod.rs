//! Data models shared between the notification policy, the publisher and
//! the configuration store.

mod build;
mod notifier_config;

pub use build::{BuildOutcome, BuildResult};
pub use notifier_config::{ConfigForm, ConnectionParams, NotifierConfig, Secret};
