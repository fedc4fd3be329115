use std::time::Duration;

use reqwest::redirect::Policy;

use crate::config::HttpConfig;
use crate::error::{NotifierError, NotifierResult};

/// Build the HTTP client shared by every exchange with the status endpoint
///
/// The client is created once per descriptor and cloned into each provider,
/// so connections are pooled across build notifications.
///
/// # Features
/// - **Timeouts**: bounded request and connect timeouts from `[http]`
/// - **No redirects**: the connection test judges the endpoint's own status
///   code, and credentials are never replayed to another location
/// - **Security**: Uses Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```ignore
/// let client = build_http_client(&settings.http)?;
/// let response = client.get("https://status.example.com/api").send().await?;
/// ```
pub fn build_http_client(config: &HttpConfig) -> NotifierResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(config.request_timeout))
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        // Connection pooling
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(Duration::from_secs(90))
        .redirect(Policy::none())
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| NotifierError::Configuration {
            key: "http".to_string(),
            source: e.into(),
        })
}
