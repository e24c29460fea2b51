//! Origin Fetch Module
//!
//! The slow upstream this service shields. On a full cache miss the
//! orchestrator fetches from here: an HTTP GET against the configured base
//! URL with the original path and query forwarded. The body must be JSON;
//! a 2xx with an unparseable body is as fatal as a non-success status.
//!
//! Retry policy, if any, belongs to the origin service's own fronting
//! infrastructure; this client attempts each fetch exactly once.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::OriginError;

// == Origin Contract ==
/// The origin-fetch seam the orchestrator invokes on a full miss.
#[async_trait]
pub trait Origin: Send + Sync {
    /// Fetches the payload for `path` (leading slash included) and the
    /// already-encoded query string.
    async fn fetch(&self, path: &str, encoded_query: &str) -> Result<Value, OriginError>;
}

// == HTTP Origin ==
/// reqwest-backed [`Origin`] against a configured base URL.
#[derive(Debug, Clone)]
pub struct HttpOrigin {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrigin {
    /// Creates an origin client. Every fetch is bounded by `timeout`; on
    /// expiry the fetch fails as a transport error.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, OriginError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Builds the upstream URL: base + path minus its leading slash, plus
    /// the query when present.
    fn request_url(&self, path: &str, encoded_query: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if encoded_query.is_empty() {
            format!("{base}/{path}")
        } else {
            format!("{base}/{path}?{encoded_query}")
        }
    }
}

#[async_trait]
impl Origin for HttpOrigin {
    async fn fetch(&self, path: &str, encoded_query: &str) -> Result<Value, OriginError> {
        let url = self.request_url(path, encoded_query);
        tracing::debug!(%url, "fetching from origin");

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OriginError::Status(status));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| OriginError::Body(e.to_string()))
    }
}
