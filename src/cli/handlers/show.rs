//! Show command handler

use std::sync::Arc;

use crate::models::NotifierConfig;
use crate::services::NotifierDescriptor;

const REDACTED: &str = "********";

pub struct ShowCommandHandler {
    descriptor: Arc<NotifierDescriptor>,
}

impl ShowCommandHandler {
    pub fn new(descriptor: Arc<NotifierDescriptor>) -> Self {
        Self { descriptor }
    }

    pub fn execute(&self) {
        print!("{}", self.render(&self.descriptor.snapshot()));
    }

    /// Human-readable configuration listing; the password is never printed
    pub fn render(&self, config: &NotifierConfig) -> String {
        let or_unset = |value: &str| {
            if value.is_empty() {
                "(not set)".to_string()
            } else {
                value.to_string()
            }
        };

        let rows = [
            ("endpoint", or_unset(&config.endpoint_url)),
            ("verify TLS", config.verify_tls.to_string()),
            ("user", or_unset(&config.username)),
            (
                "password",
                (if config.password.is_empty() { "(not set)" } else { REDACTED }).to_string(),
            ),
            ("recipients", or_unset(&config.recipients_label)),
            (
                "only failures / recoveries",
                config.only_on_failure_or_recovery.to_string(),
            ),
            ("include build URL", config.include_build_url.to_string()),
            (
                "host base URL",
                or_unset(config.host_base_url.as_deref().unwrap_or_default()),
            ),
        ];

        let mut out = format!("{}\n", self.descriptor.display_name());
        for (label, value) in rows {
            out.push_str(&format!("  {:<28}{}\n", format!("{label}:"), value));
        }
        out
    }
}
