//! Service layer.
//!
//! Services encapsulate the notifier's logic and coordinate between the
//! configuration store and the HTTP status endpoint.

pub mod notifications;

pub use notifications::{BuildNotifier, NotifierDescriptor, StatusPublisher};
