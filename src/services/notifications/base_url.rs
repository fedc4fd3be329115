//! Host base URL inference.
//!
//! Absolute build URLs need the externally visible base URL of the CI host.
//! When the configuration does not carry one yet, the descriptor asks a
//! resolver once and caches the answer.

/// Source of the host's externally visible base URL
pub trait BaseUrlResolver: Send + Sync {
    /// Best guess at the base URL, `None` when nothing can be inferred
    fn infer_base_url(&self) -> Option<String>;
}

/// Resolver returning a fixed value, typically from settings
#[derive(Debug, Clone, Default)]
pub struct StaticBaseUrl(Option<String>);

impl StaticBaseUrl {
    pub fn new(base_url: Option<String>) -> Self {
        Self(base_url.filter(|url| !url.trim().is_empty()))
    }
}

impl BaseUrlResolver for StaticBaseUrl {
    fn infer_base_url(&self) -> Option<String> {
        self.0.clone()
    }
}

impl<F> BaseUrlResolver for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn infer_base_url(&self) -> Option<String> {
        self()
    }
}
