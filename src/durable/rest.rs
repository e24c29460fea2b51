//! REST table client
//!
//! Durable-store implementation against a partitioned table HTTP service.
//! Records are addressed as `{endpoint}/{table}/{partition}/{row}`; bodies
//! are JSON. Writes are PUTs, so overwriting is idempotent.
//!
//! Authentication and transport tuning beyond the request timeout are the
//! table service's concern, not this client's.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use crate::durable::{DurableRecord, DurableStore};
use crate::error::DurableError;

/// reqwest-backed [`DurableStore`] against a table HTTP service.
#[derive(Debug, Clone)]
pub struct RestTableClient {
    client: reqwest::Client,
    /// Base URL already including the table segment
    table_url: Url,
}

impl RestTableClient {
    /// Creates a client for one table of the service at `endpoint`.
    ///
    /// Every request is bounded by `timeout`; on expiry the operation fails
    /// as a transport error.
    pub fn new(endpoint: &str, table: &str, timeout: Duration) -> Result<Self, DurableError> {
        let mut table_url = Url::parse(endpoint)
            .map_err(|e| DurableError::Transport(format!("invalid table endpoint: {e}")))?;
        table_url
            .path_segments_mut()
            .map_err(|_| DurableError::Transport("table endpoint cannot be a base".to_string()))?
            .pop_if_empty()
            .push(table);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DurableError::Transport(e.to_string()))?;

        Ok(Self { client, table_url })
    }

    /// Builds the record URL for a partition/row pair, percent-encoding the
    /// segments.
    fn record_url(&self, partition_key: &str, row_key: &str) -> Url {
        let mut url = self.table_url.clone();
        url.path_segments_mut()
            .expect("base URL validated at construction")
            .push(partition_key)
            .push(row_key);
        url
    }
}

#[async_trait]
impl DurableStore for RestTableClient {
    async fn get(
        &self,
        partition_key: &str,
        row_key: &str,
    ) -> Result<DurableRecord, DurableError> {
        let url = self.record_url(partition_key, row_key);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DurableError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(DurableError::NotFound(
                partition_key.to_string(),
                row_key.to_string(),
            )),
            status if status.is_success() => response
                .json::<DurableRecord>()
                .await
                .map_err(|e| DurableError::Transport(format!("malformed record body: {e}"))),
            status => Err(DurableError::Transport(format!(
                "table service returned status {status}"
            ))),
        }
    }

    async fn put(
        &self,
        partition_key: &str,
        row_key: &str,
        value: &str,
    ) -> Result<(), DurableError> {
        let url = self.record_url(partition_key, row_key);
        let record = DurableRecord {
            partition_key: partition_key.to_string(),
            row_key: row_key.to_string(),
            value: value.to_string(),
        };

        let response = self
            .client
            .put(url)
            .json(&record)
            .send()
            .await
            .map_err(|e| DurableError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(DurableError::Transport(format!(
                "table service returned status {}",
                response.status()
            )))
        }
    }
}
