//! Remote client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the HTTP client talking to the device backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing path
    pub base_url: String,
    /// Upper bound on a single request round-trip
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_BACKEND_URL.to_string(),
            timeout: Duration::from_millis(crate::DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Create a client configuration for the given backend URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for an endpoint path such as `"logs"` or `"/logs"`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
