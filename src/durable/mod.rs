//! Durable Tier Module
//!
//! The second cache level: a remote partitioned key-value store with no TTL
//! of its own. Entries persist until explicitly overwritten; this service
//! never deletes them.
//!
//! The orchestrator consumes the tier only through the [`DurableStore`]
//! contract, so the transport behind it is swappable: a REST table service
//! in production, an in-process map in tests and endpoint-less local runs.

mod memory;
mod rest;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DurableError;

pub use memory::MemoryDurableStore;
pub use rest::RestTableClient;

// == Durable Record ==
/// One persisted cache record.
///
/// `partition_key` is the sanitized request path, grouping all cached
/// variants of one endpoint; `row_key` is the full fingerprint; `value` is
/// the canonical JSON-serialized payload as a string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurableRecord {
    /// Partition the record lives in
    pub partition_key: String,
    /// Row key within the partition
    pub row_key: String,
    /// Canonical JSON payload
    pub value: String,
}

// == Durable Store Contract ==
/// The narrow contract the orchestrator needs from the durable tier.
#[async_trait]
pub trait DurableStore: Send + Sync {
    /// Fetches a record. `DurableError::NotFound` signals an absent record
    /// distinctly from `DurableError::Transport`.
    async fn get(&self, partition_key: &str, row_key: &str)
        -> Result<DurableRecord, DurableError>;

    /// Writes a record, overwriting any existing one (idempotent upsert).
    async fn put(&self, partition_key: &str, row_key: &str, value: &str)
        -> Result<(), DurableError>;
}
