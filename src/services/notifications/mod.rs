//! Build status notifications.
//!
//! `NotificationPolicy` decides and renders, `StatusPublisher` is what the
//! host calls per completed build, and `NotifierDescriptor` owns the shared
//! configuration, the connection test and delivery. The `StatusProvider`
//! trait is the seam between delivery and the HTTP status service.

mod base_url;
mod descriptor;
mod http_status_provider;
mod policy;
mod provider;
mod publisher;

pub use base_url::{BaseUrlResolver, StaticBaseUrl};
pub use descriptor::{ConnectionCheck, ConnectionFailure, NotifierDescriptor};
pub use http_status_provider::{HttpStatusProvider, TEXT_FIELD};
pub use policy::{NotificationPolicy, RenderedMessage};
pub use provider::StatusProvider;
pub use publisher::{BuildNotifier, StatusPublisher};
