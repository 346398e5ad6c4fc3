//! HTTP transport for the order API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use thiserror::Error;
use tracing::{debug, warn};

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("http status {code}: {body}")]
    Status { code: u16, body: String },
}

/// Transport performs a single GET and hands back the raw body.
///
/// Authentication is part of the URL's query string, so implementations
/// add nothing to the request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// Transport backed by reqwest.
pub struct HttpTransport {
    http_client: HttpClient,
}

impl HttpTransport {
    /// Creates a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        // reqwest errors carry the URL, and with it the API key.
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(reqwest::Error::without_url)?;

        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if status.is_client_error() || status.is_server_error() {
            let body = String::from_utf8_lossy(&body).to_string();
            warn!(code = status.as_u16(), body = %body, "api error");
            return Err(TransportError::Status {
                code: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }
}
