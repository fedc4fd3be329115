//! HTTP status provider implementation.
//!
//! Talks to a microblogging-style status endpoint: a form-encoded POST with a
//! single `text` field publishes, an authenticated GET tests the connection.
//! Basic credentials are attached to requests for the configured endpoint only.

use super::policy::RenderedMessage;
use super::provider::StatusProvider;
use crate::error::{NotifierError, NotifierResult};
use crate::models::ConnectionParams;
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use std::time::Instant;

/// Form field carrying the message text
pub const TEXT_FIELD: &str = "text";

/// HTTP status provider
///
/// # Example
/// ```ignore
/// let provider = HttpStatusProvider::new(client, config.connection_params());
/// provider.send(&message).await?;
/// ```
pub struct HttpStatusProvider {
    client: reqwest::Client,
    params: ConnectionParams,
}

impl HttpStatusProvider {
    pub fn new(client: reqwest::Client, params: ConnectionParams) -> Self {
        Self { client, params }
    }

    /// Attach Basic credentials unless both user and password are empty
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder {
        if self.params.username.is_empty() && self.params.password.is_empty() {
            request
        } else {
            request.basic_auth(&self.params.username, Some(self.params.password.expose()))
        }
    }

    fn connectivity(&self, source: reqwest::Error) -> NotifierError {
        NotifierError::Connectivity {
            endpoint: self.params.endpoint_url.clone(),
            source,
        }
    }
}

#[async_trait]
impl StatusProvider for HttpStatusProvider {
    async fn send(&self, message: &RenderedMessage) -> NotifierResult<()> {
        let start = Instant::now();
        tracing::info!("Attempting to update status to: {}", message);

        let request = self
            .client
            .post(&self.params.endpoint_url)
            .form(&[(TEXT_FIELD, message.as_str())]);

        let response = self
            .authenticate(request)
            .send()
            .await
            .map_err(|e| self.connectivity(e))?;

        tracing::debug!(
            endpoint = %self.params.endpoint_url,
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Status endpoint responded"
        );

        Ok(())
    }

    async fn check_connection(&self) -> NotifierResult<()> {
        tracing::debug!(
            endpoint = %self.params.endpoint_url,
            user = %self.params.username,
            check_ssl = self.params.verify_tls,
            "Testing connection to status endpoint"
        );
        if !self.params.verify_tls {
            tracing::debug!("checkSSL is off; the shared client still verifies certificates");
        }

        let request = self.client.get(&self.params.endpoint_url);
        let response = self
            .authenticate(request)
            .send()
            .await
            .map_err(|e| self.connectivity(e))?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(NotifierError::UnexpectedStatus {
                status: status.as_u16(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "http-status"
    }
}
