//! Configuration for the CMS client.

use std::time::Duration;

/// Base URL of the public song catalog.
pub const DEFAULT_BASE_URL: &str = "https://cms.samespace.com";

/// Configuration for connecting to the CMS.
#[derive(Debug, Clone)]
pub struct CmsConfig {
    /// Base URL of the CMS (e.g., "https://cms.samespace.com")
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl CmsConfig {
    /// Create a config for the given base URL with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}
