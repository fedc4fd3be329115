//! Core status provider trait.
//!
//! A provider knows how to hand a rendered message to one kind of status
//! service and how to check that the service is reachable.

use super::policy::RenderedMessage;
use crate::error::NotifierResult;
use async_trait::async_trait;

/// Trait for status providers
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync so one can be shared across concurrent
/// build completions.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Posts one status message.
    ///
    /// The response status is not inspected; only transport failures are
    /// reported as errors.
    async fn send(&self, message: &RenderedMessage) -> NotifierResult<()>;

    /// Checks that the endpoint answers an authenticated GET with 200
    ///
    /// # Returns
    /// `Err(NotifierError::UnexpectedStatus)` for any other status,
    /// `Err(NotifierError::Connectivity)` for transport failures
    async fn check_connection(&self) -> NotifierResult<()>;

    /// Returns the provider name for logging
    fn name(&self) -> &'static str;
}
