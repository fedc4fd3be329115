//! Notifier configuration models.
//!
//! `NotifierConfig` is the process-wide configuration shared by every
//! notification. `ConfigForm` is the administrative form that updates it,
//! bound from JSON with the field names the configuration page submits.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Form values that mean "no value" rather than literal text
const VALUES_REPLACED_WITH_NULL: &[&str] = &["", "(Default)", "(System Default)"];

// ============================================================================
// Secret
// ============================================================================

/// A string that never shows up in `Debug` output or logs
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(\"\")")
        } else {
            f.write_str("Secret(\"********\")")
        }
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// ============================================================================
// NotifierConfig
// ============================================================================

fn default_true() -> bool {
    true
}

/// Global notifier configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Prefix of every message, usually a mention such as `@team`
    #[serde(default)]
    pub recipients_label: String,

    /// Status endpoint receiving both the connection test GET and the publish POST
    #[serde(default)]
    pub endpoint_url: String,

    /// Stored for the configuration page; not consulted by delivery
    #[serde(default)]
    pub verify_tls: bool,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: Secret,

    /// Only notify on failed, unstable or recovered builds
    #[serde(default = "default_true")]
    pub only_on_failure_or_recovery: bool,

    /// Append the absolute build URL to each message
    #[serde(default)]
    pub include_build_url: bool,

    /// Externally visible base URL of the CI host, inferred once when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_base_url: Option<String>,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            recipients_label: String::new(),
            endpoint_url: String::new(),
            verify_tls: false,
            username: String::new(),
            password: Secret::default(),
            only_on_failure_or_recovery: default_true(),
            include_build_url: false,
            host_base_url: None,
        }
    }
}

impl NotifierConfig {
    /// Whether an endpoint has been configured at all
    pub fn has_endpoint(&self) -> bool {
        !self.endpoint_url.trim().is_empty()
    }

    /// Connection parameters for the stored endpoint and credentials
    pub fn connection_params(&self) -> ConnectionParams {
        ConnectionParams {
            endpoint_url: self.endpoint_url.clone(),
            verify_tls: self.verify_tls,
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Apply a submitted form.
    ///
    /// Both checkboxes are reset to their defaults first, so a checkbox absent
    /// from the submission ends up at its default. Text fields absent from the
    /// submission keep their current value.
    pub fn apply_form(&mut self, form: &ConfigForm) {
        self.include_build_url = false;
        self.only_on_failure_or_recovery = true;

        if let Some(url) = &form.server_url {
            self.endpoint_url = normalize(url).unwrap_or_default();
        }
        if let Some(check_ssl) = form.check_ssl {
            self.verify_tls = check_ssl;
        }
        if let Some(user) = &form.user {
            self.username = normalize(user).unwrap_or_default();
        }
        // Stored verbatim, no trimming or placeholder mapping
        if let Some(pass) = &form.pass {
            self.password = Secret::new(pass.clone());
        }
        if let Some(recipients) = &form.recipients {
            self.recipients_label = normalize(recipients).unwrap_or_default();
        }
        if let Some(only) = form.only_on_failure_or_recovery {
            self.only_on_failure_or_recovery = only;
        }
        if let Some(include) = form.include_url {
            self.include_build_url = include;
        }
        if let Some(base_url) = &form.hudson_url {
            self.host_base_url = normalize(base_url);
        }
    }
}

/// Trim a form value, mapping the placeholder values to `None`
fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if VALUES_REPLACED_WITH_NULL.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// ConfigForm
// ============================================================================

/// Administrative configuration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigForm {
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default, rename = "checkSSL")]
    pub check_ssl: Option<bool>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub pass: Option<String>,
    #[serde(default)]
    pub recipients: Option<String>,
    #[serde(default)]
    pub only_on_failure_or_recovery: Option<bool>,
    #[serde(default)]
    pub include_url: Option<bool>,
    #[serde(default)]
    pub hudson_url: Option<String>,
}

impl ConfigForm {
    /// Bind a submitted JSON form
    ///
    /// # Example
    /// ```ignore
    /// let form = ConfigForm::from_json(&json!({"serverUrl": "https://status.example.com/api"}))?;
    /// ```
    pub fn from_json(form: &JsonValue) -> Result<Self, serde_json::Error> {
        serde_json::from_value(form.clone())
    }

    /// Connection parameters the form would store, falling back to the
    /// stored configuration for fields the form leaves out
    pub fn connection_params(&self, stored: &NotifierConfig) -> ConnectionParams {
        let mut config = stored.clone();
        config.apply_form(self);
        config.connection_params()
    }
}

/// Endpoint and credentials for one HTTP exchange with the status service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionParams {
    pub endpoint_url: String,
    pub verify_tls: bool,
    pub username: String,
    pub password: Secret,
}
