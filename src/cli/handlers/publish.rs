//! Publish command handler

use std::sync::Arc;

use crate::models::BuildOutcome;
use crate::services::{BuildNotifier, NotifierDescriptor};

pub struct PublishCommandHandler {
    descriptor: Arc<NotifierDescriptor>,
}

impl PublishCommandHandler {
    pub fn new(descriptor: Arc<NotifierDescriptor>) -> Self {
        Self { descriptor }
    }

    /// Report one completed build.
    ///
    /// Delivery problems are logged and never surface here, so a finished
    /// build is not turned into a failed one by its notification.
    ///
    /// # Returns
    /// Whether the outcome qualified for a status update
    pub async fn execute(&self, outcome: &BuildOutcome, recipients: Option<String>) -> bool {
        let publisher = self.descriptor.new_publisher(recipients);

        if !publisher.should_publish(outcome) {
            tracing::info!(
                project = %outcome.project_name,
                result = %outcome.result,
                "No status update for this build"
            );
            return false;
        }

        publisher.publish(outcome).await;
        true
    }
}
