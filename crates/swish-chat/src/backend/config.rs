//! Chat backend client configuration.

use std::time::Duration;

/// Origin of the chat backend in a local development build.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8081";

/// Chat backend client configuration.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }

    /// Create config from the environment, falling back to the local
    /// development backend.
    ///
    /// Resolution order:
    /// 1. `SWISH_CHAT_URL` env var
    /// 2. [`DEFAULT_BACKEND_URL`]
    pub fn from_env() -> Self {
        match std::env::var("SWISH_CHAT_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
