//! Notification policy: whether a build warrants a status update and what
//! the update says. Pure functions, no I/O.

use crate::error::{NotifierError, NotifierResult};
use crate::models::{BuildOutcome, BuildResult, NotifierConfig};
use serde::Serialize;
use std::fmt;

/// A single-line status message, ready to post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderedMessage(String);

impl RenderedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decides whether to notify and renders the message text
pub struct NotificationPolicy;

impl NotificationPolicy {
    /// Whether this outcome should produce a status update.
    ///
    /// With `only_on_failure_or_recovery` off every build notifies.
    pub fn should_notify(outcome: &BuildOutcome, only_on_failure_or_recovery: bool) -> bool {
        if only_on_failure_or_recovery {
            Self::is_failure_or_recovery(outcome)
        } else {
            true
        }
    }

    /// Whether this build is a failure or a recovery.
    ///
    /// Failed and unstable builds count as failures. A recovery is a
    /// successful build whose predecessor was not successful. Aborted and any
    /// other states never count.
    pub fn is_failure_or_recovery(outcome: &BuildOutcome) -> bool {
        match &outcome.result {
            BuildResult::Failure | BuildResult::Unstable => true,
            BuildResult::Success => outcome
                .previous_result
                .as_ref()
                .is_some_and(|previous| !previous.is_success()),
            _ => false,
        }
    }

    /// Render `"{recipients} Project: #{project} has Status {RESULT}"`,
    /// followed by the absolute build URL when `include_build_url` is set.
    ///
    /// # Errors
    /// `NotifierError::Render` if any input would put a line break in the message.
    pub fn render_message(
        outcome: &BuildOutcome,
        config: &NotifierConfig,
    ) -> NotifierResult<RenderedMessage> {
        let mut text = format!(
            "{} Project: #{} has Status {}",
            config.recipients_label, outcome.project_name, outcome.result
        );

        if config.include_build_url {
            let base_url = config.host_base_url.as_deref().unwrap_or_default();
            text.push(' ');
            text.push_str(base_url);
            text.push_str(&outcome.build_path);
        }

        if text.contains(['\n', '\r']) {
            return Err(NotifierError::render(format!(
                "status message for project '{}' would span multiple lines",
                outcome.project_name.escape_debug()
            )));
        }

        Ok(RenderedMessage(text))
    }
}
