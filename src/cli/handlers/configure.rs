//! Configure command handler

use std::sync::Arc;

use crate::cli::parser::ConnectionArgs;
use crate::error::NotifierResult;
use crate::models::{ConfigForm, NotifierConfig};
use crate::services::NotifierDescriptor;

pub struct ConfigureCommandHandler {
    descriptor: Arc<NotifierDescriptor>,
}

impl ConfigureCommandHandler {
    pub fn new(descriptor: Arc<NotifierDescriptor>) -> Self {
        Self { descriptor }
    }

    /// Build the form submitted by individual command-line options.
    ///
    /// Unset checkbox flags are left out of the form, which resets them.
    pub fn form_from_args(
        connection: &ConnectionArgs,
        recipients: Option<&str>,
        include_url: bool,
        notify_every_build: bool,
        hudson_url: Option<&str>,
    ) -> ConfigForm {
        ConfigForm {
            recipients: recipients.map(str::to_string),
            include_url: include_url.then_some(true),
            only_on_failure_or_recovery: notify_every_build.then_some(false),
            hudson_url: hudson_url.map(str::to_string),
            ..connection.to_form()
        }
    }

    /// Apply and persist the form
    ///
    /// # Errors
    /// - Validation error when the endpoint is not an http(s) URL
    /// - Storage error when the configuration cannot be saved
    pub fn execute(&self, form: &ConfigForm) -> NotifierResult<NotifierConfig> {
        let config = self.descriptor.configure(form)?;

        println!("✓ {} configuration saved", self.descriptor.display_name());
        if config.has_endpoint() {
            println!("  endpoint: {}", config.endpoint_url);
        } else {
            println!("  no endpoint configured, status updates are disabled");
        }
        Ok(config)
    }
}
