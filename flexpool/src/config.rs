use std::time::Duration;

/// Public Flexpool API, version 1.
pub const DEFAULT_BASE_URL: &str = "https://flexpool.io/api/v1";

/// Environment variable the binaries read to override the base URL.
pub const API_URL_ENV: &str = "FLEXPOOL_API_URL";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without the endpoint path. A trailing slash is ignored.
    pub base_url: String,

    /// Upper bound on a single request, connect through body read.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
