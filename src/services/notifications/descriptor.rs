//! Global notifier descriptor.
//!
//! Owns the process-wide `NotifierConfig`, its storage collaborator and the
//! shared HTTP client. Publishers read configuration through it; the
//! administrative surface updates it through `configure` and checks an
//! endpoint through `test_connection`.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use reqwest::Url;

use super::base_url::BaseUrlResolver;
use super::http_status_provider::HttpStatusProvider;
use super::policy::RenderedMessage;
use super::provider::StatusProvider;
use super::publisher::StatusPublisher;
use crate::error::{NotifierError, NotifierResult};
use crate::models::{ConfigForm, ConnectionParams, NotifierConfig};
use crate::repositories::ConfigStore;

/// Why a connection test did not succeed, ready to show an administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionFailure {
    /// HTTP status returned by the endpoint, `None` for transport failures
    pub status_code: Option<u16>,
    pub message: String,
}

impl fmt::Display for ConnectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<NotifierError> for ConnectionFailure {
    fn from(error: NotifierError) -> Self {
        match error {
            NotifierError::UnexpectedStatus { status } => ConnectionFailure {
                status_code: Some(status),
                message: format!("Error: {}", status),
            },
            NotifierError::Connectivity { source, .. } => ConnectionFailure {
                status_code: None,
                message: format!("Client error : {}", source),
            },
            other => ConnectionFailure {
                status_code: other.status_code(),
                message: format!("Client error : {}", other),
            },
        }
    }
}

/// Outcome of a connection test: `Ok("Success")` or a displayable failure
pub type ConnectionCheck = Result<String, ConnectionFailure>;

/// Holder of the global notifier configuration
pub struct NotifierDescriptor {
    config: RwLock<NotifierConfig>,
    store: Arc<dyn ConfigStore>,
    base_url: Arc<dyn BaseUrlResolver>,
    client: reqwest::Client,
}

impl NotifierDescriptor {
    pub const DISPLAY_NAME: &'static str = "Statuses Notifier";

    /// Load the stored configuration, falling back to defaults when nothing
    /// has been saved yet
    ///
    /// # Arguments
    /// * `store` - Storage collaborator for the configuration
    /// * `base_url` - Resolver consulted when the host base URL is unset
    /// * `client` - HTTP client shared by every delivery and connection test
    pub fn load(
        store: Arc<dyn ConfigStore>,
        base_url: Arc<dyn BaseUrlResolver>,
        client: reqwest::Client,
    ) -> NotifierResult<Self> {
        let config = store.load()?.unwrap_or_default();
        tracing::debug!(
            endpoint = %config.endpoint_url,
            only_on_failure_or_recovery = config.only_on_failure_or_recovery,
            include_build_url = config.include_build_url,
            "Loaded notifier configuration"
        );

        Ok(Self {
            config: RwLock::new(config),
            store,
            base_url,
            client,
        })
    }

    pub fn display_name(&self) -> &'static str {
        Self::DISPLAY_NAME
    }

    /// Persist the current configuration
    pub fn save(&self) -> NotifierResult<()> {
        self.store.save(&self.snapshot())
    }

    /// Copy of the current configuration.
    ///
    /// Each notification works from its own snapshot, so a concurrent
    /// `configure` is seen either entirely or not at all.
    pub fn snapshot(&self) -> NotifierConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply an administrative form submission and persist the result
    ///
    /// Checkboxes are reset to their defaults before the form is applied; the
    /// host base URL is inferred if neither the form nor the stored
    /// configuration provides one.
    ///
    /// # Returns
    /// The configuration now in effect
    pub fn configure(&self, form: &ConfigForm) -> NotifierResult<NotifierConfig> {
        let mut config = self.snapshot();
        config.apply_form(form);
        validate_endpoint(&config.endpoint_url)?;

        if config.host_base_url.is_none() {
            config.host_base_url = self.base_url.infer_base_url();
        }

        self.store.save(&config)?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config.clone();

        tracing::info!(
            endpoint = %config.endpoint_url,
            user = %config.username,
            only_on_failure_or_recovery = config.only_on_failure_or_recovery,
            include_build_url = config.include_build_url,
            "Updated notifier configuration"
        );
        Ok(config)
    }

    /// Infer and persist the host base URL if it is still unset
    ///
    /// Part of the notification path, so it never fails: when the inferred
    /// value cannot be saved it is logged and kept in memory only.
    ///
    /// # Returns
    /// The base URL in effect afterwards
    pub fn ensure_base_url(&self) -> Option<String> {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        if guard.host_base_url.is_some() {
            return guard.host_base_url.clone();
        }

        let inferred = self.base_url.infer_base_url()?;
        tracing::info!(base_url = %inferred, "Inferred host base URL");

        let mut updated = guard.clone();
        updated.host_base_url = Some(inferred.clone());
        if let Err(e) = self.store.save(&updated) {
            tracing::error!(error = %e, "Unable to persist inferred host base URL");
        }
        *guard = updated;
        Some(inferred)
    }

    /// Create a publisher for one job, inferring the host base URL first
    ///
    /// # Arguments
    /// * `recipients` - Job-specific recipients label, overriding the global one
    pub fn new_publisher(self: &Arc<Self>, recipients: Option<String>) -> StatusPublisher {
        self.ensure_base_url();
        let publisher = StatusPublisher::new(Arc::clone(self));
        match recipients {
            Some(recipients) => publisher.with_recipients(recipients),
            None => publisher,
        }
    }

    /// Check that an endpoint accepts the given credentials.
    ///
    /// Dry run: the stored configuration is not touched. Never fails; every
    /// problem is folded into the returned `ConnectionCheck`.
    pub async fn test_connection(&self, params: &ConnectionParams) -> ConnectionCheck {
        tracing::info!(
            endpoint = %params.endpoint_url,
            user = %params.username,
            "Testing connection"
        );

        let provider = HttpStatusProvider::new(self.client.clone(), params.clone());
        match provider.check_connection().await {
            Ok(()) => Ok("Success".to_string()),
            Err(e) => {
                tracing::warn!(endpoint = %params.endpoint_url, error = %e, "Connection test failed");
                Err(ConnectionFailure::from(e))
            }
        }
    }

    /// Deliver a message using the current configuration
    pub async fn deliver(&self, message: &RenderedMessage) -> NotifierResult<()> {
        self.deliver_with(&self.snapshot(), message).await
    }

    /// Deliver a message using an already taken configuration snapshot
    pub async fn deliver_with(
        &self,
        config: &NotifierConfig,
        message: &RenderedMessage,
    ) -> NotifierResult<()> {
        if !config.has_endpoint() {
            return Err(NotifierError::validation(
                "endpoint_url",
                "No status endpoint is configured",
            ));
        }

        let provider = self.create_provider(config);
        tracing::debug!(provider = provider.name(), endpoint = %config.endpoint_url, "Delivering status update");
        provider.send(message).await
    }

    /// Creates the provider for the configured endpoint
    fn create_provider(&self, config: &NotifierConfig) -> Arc<dyn StatusProvider> {
        Arc::new(HttpStatusProvider::new(
            self.client.clone(),
            config.connection_params(),
        ))
    }
}

/// An empty endpoint is allowed (notifier not set up yet); anything else
/// must be an absolute http(s) URL
fn validate_endpoint(endpoint: &str) -> NotifierResult<()> {
    if endpoint.is_empty() {
        return Ok(());
    }

    let url = Url::parse(endpoint)
        .map_err(|e| NotifierError::validation("serverUrl", format!("Invalid URL format: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(NotifierError::validation(
            "serverUrl",
            "URL must use http or https protocol",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::external::build_http_client;
    use crate::models::Secret;
    use crate::repositories::{MemoryStore, ReadOnlyStore};
    use crate::services::notifications::StaticBaseUrl;
    use wiremock::matchers::{basic_auth, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn descriptor_with(
        store: Arc<MemoryStore>,
        base_url: Option<&str>,
    ) -> Arc<NotifierDescriptor> {
        let client = build_http_client(&HttpConfig::default()).unwrap();
        Arc::new(
            NotifierDescriptor::load(
                store,
                Arc::new(StaticBaseUrl::new(base_url.map(str::to_string))),
                client,
            )
            .unwrap(),
        )
    }

    fn params(endpoint: String) -> ConnectionParams {
        ConnectionParams {
            endpoint_url: endpoint,
            verify_tls: true,
            username: "ci-bot".to_string(),
            password: Secret::new("s3cret"),
        }
    }

    #[test]
    fn test_load_defaults_when_store_is_empty() {
        let descriptor = descriptor_with(Arc::new(MemoryStore::new()), None);
        assert_eq!(descriptor.snapshot(), NotifierConfig::default());
        assert_eq!(descriptor.display_name(), "Statuses Notifier");
    }

    #[test]
    fn test_configure_applies_form_infers_base_url_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let descriptor = descriptor_with(store.clone(), Some("http://ci.local:8080/"));

        let form = ConfigForm {
            server_url: Some("https://status.example.com/api/statuses".to_string()),
            user: Some("ci-bot".to_string()),
            pass: Some("s3cret".to_string()),
            include_url: Some(true),
            ..Default::default()
        };
        let config = descriptor.configure(&form).unwrap();

        assert_eq!(config.endpoint_url, "https://status.example.com/api/statuses");
        assert!(config.include_build_url);
        assert!(config.only_on_failure_or_recovery);
        assert_eq!(config.host_base_url.as_deref(), Some("http://ci.local:8080/"));
        assert_eq!(store.stored(), Some(config.clone()));
        assert_eq!(descriptor.snapshot(), config);
    }

    #[test]
    fn test_configure_keeps_cached_base_url() {
        let store = Arc::new(MemoryStore::with_config(NotifierConfig {
            host_base_url: Some("https://ci.example.com/".to_string()),
            ..Default::default()
        }));
        let descriptor = descriptor_with(store, Some("http://elsewhere/"));

        let config = descriptor.configure(&ConfigForm::default()).unwrap();
        assert_eq!(config.host_base_url.as_deref(), Some("https://ci.example.com/"));
    }

    #[test]
    fn test_configure_rejects_invalid_endpoint_without_saving() {
        let store = Arc::new(MemoryStore::new());
        let descriptor = descriptor_with(store.clone(), None);

        let form = ConfigForm {
            server_url: Some("ftp://status.example.com".to_string()),
            ..Default::default()
        };
        let error = descriptor.configure(&form).unwrap_err();
        assert!(matches!(error, NotifierError::Validation { .. }));
        assert!(store.stored().is_none());
    }

    #[test]
    fn test_ensure_base_url_infers_once() {
        let store = Arc::new(MemoryStore::new());
        let descriptor = descriptor_with(store.clone(), Some("http://ci.local:8080/"));

        assert_eq!(
            descriptor.ensure_base_url().as_deref(),
            Some("http://ci.local:8080/")
        );
        assert_eq!(
            store.stored().unwrap().host_base_url.as_deref(),
            Some("http://ci.local:8080/")
        );
    }

    #[test]
    fn test_ensure_base_url_keeps_value_when_save_fails() {
        let client = build_http_client(&HttpConfig::default()).unwrap();
        let descriptor = NotifierDescriptor::load(
            Arc::new(ReadOnlyStore::default()),
            Arc::new(StaticBaseUrl::new(Some("http://ci.local:8080/".to_string()))),
            client,
        )
        .unwrap();

        assert_eq!(
            descriptor.ensure_base_url().as_deref(),
            Some("http://ci.local:8080/")
        );
        assert_eq!(
            descriptor.snapshot().host_base_url.as_deref(),
            Some("http://ci.local:8080/")
        );
    }

    #[test]
    fn test_ensure_base_url_without_resolver_value() {
        let store = Arc::new(MemoryStore::new());
        let descriptor = descriptor_with(store.clone(), None);
        assert_eq!(descriptor.ensure_base_url(), None);
        assert!(store.stored().is_none());
    }

    #[tokio::test]
    async fn test_connection_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(basic_auth("ci-bot", "s3cret"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let store = Arc::new(MemoryStore::new());
        let descriptor = descriptor_with(store.clone(), None);
        let check = descriptor.test_connection(&params(server.uri())).await;

        assert_eq!(check, Ok("Success".to_string()));
        // Dry run: nothing persisted
        assert!(store.stored().is_none());
    }

    #[tokio::test]
    async fn test_connection_non_200_statuses_are_errors() {
        for status in [301u16, 404, 500] {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(status))
                .mount(&server)
                .await;

            let descriptor = descriptor_with(Arc::new(MemoryStore::new()), None);
            let failure = descriptor
                .test_connection(&params(server.uri()))
                .await
                .unwrap_err();

            assert_eq!(failure.status_code, Some(status));
            assert_eq!(failure.message, format!("Error: {}", status));
        }
    }

    #[tokio::test]
    async fn test_connection_transport_error_is_reported_not_raised() {
        let descriptor = descriptor_with(Arc::new(MemoryStore::new()), None);
        let failure = descriptor
            .test_connection(&params("http://127.0.0.1:1/".to_string()))
            .await
            .unwrap_err();

        assert_eq!(failure.status_code, None);
        assert!(failure.message.starts_with("Client error : "));
    }

    #[tokio::test]
    async fn test_connection_malformed_url_is_reported_not_raised() {
        let descriptor = descriptor_with(Arc::new(MemoryStore::new()), None);
        let failure = descriptor
            .test_connection(&params("not a url".to_string()))
            .await
            .unwrap_err();
        assert!(failure.message.starts_with("Client error : "));
    }

    #[tokio::test]
    async fn test_deliver_without_endpoint_is_validation_error() {
        let descriptor = descriptor_with(Arc::new(MemoryStore::new()), None);
        let config = NotifierConfig::default();
        let outcome = crate::models::BuildOutcome::new(
            "api",
            crate::models::BuildResult::Failure,
            "",
        );
        let message =
            crate::services::notifications::NotificationPolicy::render_message(&outcome, &config)
                .unwrap();

        let error = descriptor.deliver(&message).await.unwrap_err();
        assert!(matches!(error, NotifierError::Validation { .. }));
    }
}
