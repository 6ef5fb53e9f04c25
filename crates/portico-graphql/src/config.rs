//! HTTP client configuration.

use std::time::Duration;

/// Settings shared by every client a factory builds.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Per-request timeout. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("portico/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: None,
        }
    }
}
