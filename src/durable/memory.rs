//! In-memory durable backend
//!
//! Implements the durable-store contract on a process-local map. Used by the
//! test suite and as the fallback backend when no table endpoint is
//! configured, so the service stays runnable without external storage.
//! Unlike the TTL store, records here never expire.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::durable::{DurableRecord, DurableStore};
use crate::error::DurableError;

/// Process-local implementation of [`DurableStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryDurableStore {
    records: Arc<RwLock<HashMap<(String, String), String>>>,
}

impl MemoryDurableStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DurableStore for MemoryDurableStore {
    async fn get(
        &self,
        partition_key: &str,
        row_key: &str,
    ) -> Result<DurableRecord, DurableError> {
        let records = self.records.read().await;
        records
            .get(&(partition_key.to_string(), row_key.to_string()))
            .map(|value| DurableRecord {
                partition_key: partition_key.to_string(),
                row_key: row_key.to_string(),
                value: value.clone(),
            })
            .ok_or_else(|| {
                DurableError::NotFound(partition_key.to_string(), row_key.to_string())
            })
    }

    async fn put(
        &self,
        partition_key: &str,
        row_key: &str,
        value: &str,
    ) -> Result<(), DurableError> {
        let mut records = self.records.write().await;
        records.insert(
            (partition_key.to_string(), row_key.to_string()),
            value.to_string(),
        );
        Ok(())
    }
}
