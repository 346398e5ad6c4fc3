//! Marketplace order API configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Seller order endpoint of the marketplace API.
pub const DEFAULT_BASE_URL: &str = "https://www.tindie.com/api/v1/order/";

/// Orders requested per page when walking the full history.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Pause between successive page requests.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

/// HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the order API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Endpoint URL, without query string.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Seller username (overridden by `TINDIE_USERNAME`).
    #[serde(default)]
    pub username: String,
    /// API key (loaded from `TINDIE_API_KEY`).
    #[serde(skip)]
    pub api_key: String,
    /// Orders per page for full pagination.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Delay between page requests.
    #[serde(default = "default_page_delay", with = "duration")]
    pub page_delay: Duration,
    /// Per-request timeout.
    #[serde(default = "default_request_timeout", with = "duration")]
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Creates a config for the default endpoint with the given credentials.
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            username: username.into(),
            api_key: api_key.into(),
            page_size: DEFAULT_PAGE_SIZE,
            page_delay: DEFAULT_PAGE_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page_delay() -> Duration {
    DEFAULT_PAGE_DELAY
}

fn default_request_timeout() -> Duration {
    DEFAULT_REQUEST_TIMEOUT
}
