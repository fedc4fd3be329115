//! Build-completion publisher.
//!
//! The host calls a `BuildNotifier` once per completed build. Notification is
//! best effort: whatever happens while rendering or delivering, the build
//! step reports success.

use std::sync::Arc;

use async_trait::async_trait;

use super::descriptor::NotifierDescriptor;
use super::policy::{NotificationPolicy, RenderedMessage};
use crate::error::NotifierResult;
use crate::models::{BuildOutcome, NotifierConfig};

/// Interface the host's build lifecycle calls into
#[async_trait]
pub trait BuildNotifier: Send + Sync {
    /// Whether a status update would be sent for this outcome
    fn should_publish(&self, outcome: &BuildOutcome) -> bool;

    /// Handle one completed build.
    ///
    /// # Returns
    /// Whether the build step succeeded; notification problems never fail it
    async fn publish(&self, outcome: &BuildOutcome) -> bool;
}

/// Posts build status updates through the shared descriptor
#[derive(Clone)]
pub struct StatusPublisher {
    descriptor: Arc<NotifierDescriptor>,
    recipients: Option<String>,
}

impl StatusPublisher {
    pub fn new(descriptor: Arc<NotifierDescriptor>) -> Self {
        Self {
            descriptor,
            recipients: None,
        }
    }

    /// Use a job-specific recipients label instead of the global one
    pub fn with_recipients(mut self, recipients: impl Into<String>) -> Self {
        self.recipients = Some(recipients.into());
        self
    }

    pub fn recipients(&self) -> Option<&str> {
        self.recipients.as_deref()
    }

    pub fn descriptor(&self) -> &Arc<NotifierDescriptor> {
        &self.descriptor
    }

    /// Render the message this publisher would send for an outcome
    pub fn create_status_message(&self, outcome: &BuildOutcome) -> NotifierResult<RenderedMessage> {
        NotificationPolicy::render_message(outcome, &self.effective_config())
    }

    /// Descriptor snapshot with this publisher's recipients applied
    fn effective_config(&self) -> NotifierConfig {
        let mut config = self.descriptor.snapshot();
        if let Some(recipients) = &self.recipients {
            config.recipients_label = recipients.clone();
        }
        config
    }

    async fn render_and_deliver(
        &self,
        outcome: &BuildOutcome,
        config: &NotifierConfig,
    ) -> NotifierResult<()> {
        let message = NotificationPolicy::render_message(outcome, config)?;
        self.descriptor.deliver_with(config, &message).await
    }
}

#[async_trait]
impl BuildNotifier for StatusPublisher {
    fn should_publish(&self, outcome: &BuildOutcome) -> bool {
        let config = self.descriptor.snapshot();
        NotificationPolicy::should_notify(outcome, config.only_on_failure_or_recovery)
    }

    #[tracing::instrument(
        name = "publish_status",
        skip_all,
        fields(project = %outcome.project_name, result = %outcome.result)
    )]
    async fn publish(&self, outcome: &BuildOutcome) -> bool {
        let config = self.effective_config();

        if !NotificationPolicy::should_notify(outcome, config.only_on_failure_or_recovery) {
            tracing::debug!("Build is neither a failure nor a recovery, skipping status update");
            return true;
        }

        if let Err(e) = self.render_and_deliver(outcome, &config).await {
            tracing::error!(error = %e, "Unable to send status update");
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::external::build_http_client;
    use crate::models::{BuildResult, Secret};
    use crate::repositories::MemoryStore;
    use crate::services::notifications::StaticBaseUrl;
    use wiremock::matchers::{basic_auth, body_string, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn descriptor(config: NotifierConfig) -> Arc<NotifierDescriptor> {
        let client = build_http_client(&HttpConfig::default()).unwrap();
        Arc::new(
            NotifierDescriptor::load(
                Arc::new(MemoryStore::with_config(config)),
                Arc::new(StaticBaseUrl::default()),
                client,
            )
            .unwrap(),
        )
    }

    fn config(endpoint: String) -> NotifierConfig {
        NotifierConfig {
            recipients_label: "@team".to_string(),
            endpoint_url: endpoint,
            username: "ci-bot".to_string(),
            password: Secret::new("s3cret"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_publish_posts_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(basic_auth("ci-bot", "s3cret"))
            .and(body_string(
                "text=%40team+Project%3A+%23build-42+has+Status+FAILURE",
            ))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = StatusPublisher::new(descriptor(config(server.uri())));
        let outcome = BuildOutcome::new("build-42", BuildResult::Failure, "/job/build-42/17/");

        assert!(publisher.should_publish(&outcome));
        assert!(publisher.publish(&outcome).await);
    }

    #[tokio::test]
    async fn test_publish_skips_unremarkable_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let publisher = StatusPublisher::new(descriptor(config(server.uri())));
        let outcome = BuildOutcome::new("build-42", BuildResult::Success, "/job/build-42/18/")
            .with_previous(BuildResult::Success);

        assert!(!publisher.should_publish(&outcome));
        assert!(publisher.publish(&outcome).await);
    }

    #[tokio::test]
    async fn test_publish_every_build_when_flag_off() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let mut cfg = config(server.uri());
        cfg.only_on_failure_or_recovery = false;
        let publisher = StatusPublisher::new(descriptor(cfg));
        let outcome = BuildOutcome::new("build-42", BuildResult::Aborted, "");

        assert!(publisher.publish(&outcome).await);
    }

    #[tokio::test]
    async fn test_publish_swallows_connectivity_error() {
        let publisher = StatusPublisher::new(descriptor(config("http://127.0.0.1:1/".to_string())));
        let outcome = BuildOutcome::new("build-42", BuildResult::Failure, "");

        assert!(publisher.publish(&outcome).await);
    }

    #[tokio::test]
    async fn test_publish_swallows_render_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let publisher = StatusPublisher::new(descriptor(config(server.uri())));
        let outcome = BuildOutcome::new("broken\nname", BuildResult::Failure, "");

        assert!(publisher.publish(&outcome).await);
    }

    #[tokio::test]
    async fn test_publish_ignores_error_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = StatusPublisher::new(descriptor(config(server.uri())));
        let outcome = BuildOutcome::new("build-42", BuildResult::Unstable, "");

        assert!(publisher.publish(&outcome).await);
    }

    #[test]
    fn test_job_recipients_override_global_label() {
        let publisher = StatusPublisher::new(descriptor(config("http://unused/".to_string())))
            .with_recipients("@release-managers");
        let outcome = BuildOutcome::new("build-42", BuildResult::Failure, "");

        let message = publisher.create_status_message(&outcome).unwrap();
        assert_eq!(
            message.as_str(),
            "@release-managers Project: #build-42 has Status FAILURE"
        );
    }

    #[test]
    fn test_new_publisher_through_descriptor_infers_base_url() {
        let client = build_http_client(&HttpConfig::default()).unwrap();
        let store = Arc::new(MemoryStore::with_config(NotifierConfig {
            include_build_url: true,
            ..config("http://unused/".to_string())
        }));
        let descriptor = Arc::new(
            NotifierDescriptor::load(
                store,
                Arc::new(StaticBaseUrl::new(Some("https://ci.example.com".to_string()))),
                client,
            )
            .unwrap(),
        );

        let publisher = descriptor.new_publisher(None);
        let outcome = BuildOutcome::new("build-42", BuildResult::Failure, "/job/build-42/17/");
        let message = publisher.create_status_message(&outcome).unwrap();

        assert!(
            message
                .as_str()
                .ends_with(" https://ci.example.com/job/build-42/17/")
        );
    }
}
