//! statuses-notifier
//!
//! Posts a one-line status update to an HTTP status service when a CI build
//! completes, by default only for failures and recoveries.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod repositories;
pub mod services;

pub use error::{NotifierError, NotifierResult};
pub use services::{BuildNotifier, NotifierDescriptor, StatusPublisher};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
