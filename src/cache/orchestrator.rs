//! Cache Orchestrator Module
//!
//! The cache-aside engine. Per request it decides which tier answers:
//! memory first, then the durable tier, then the origin, back-filling the
//! faster tiers as values flow down.
//!
//! Population order on a full miss is deliberate: the durable tier is
//! written before memory, and a durable write failure fails the whole
//! request. Serving a value that the next process-restart or memory miss
//! could not find again would mask the durability failure.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{Fingerprint, TtlStore};
use crate::cache::fingerprint::encode_query;
use crate::durable::DurableStore;
use crate::error::{CacheError, DurableError, Result};
use crate::origin::Origin;

// == Cache Status ==
/// Which tier answered a request. Advisory metadata only; it never affects
/// the value returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheStatus {
    /// Served from the in-memory TTL store
    MemoryHit,
    /// Served from the durable tier (and back-filled into memory)
    DurableHit,
    /// Served from the origin (and written to both tiers)
    Miss,
}

impl CacheStatus {
    /// The literal value carried in the cache-status response header.
    pub fn header_value(&self) -> &'static str {
        match self {
            CacheStatus::MemoryHit => "Hit",
            CacheStatus::DurableHit => "Table Hit",
            CacheStatus::Miss => "Miss",
        }
    }
}

// == Cache Outcome ==
/// A resolved request: the canonical JSON value plus where it came from.
#[derive(Debug, Clone)]
pub struct CacheOutcome {
    /// The fingerprint key the value is cached under
    pub key: String,
    /// Canonical JSON payload
    pub value: String,
    /// Which tier answered
    pub status: CacheStatus,
}

// == Cache Orchestrator ==
/// Ties the TTL store, the durable tier, and the origin into one lookup
/// pipeline.
#[derive(Clone)]
pub struct CacheOrchestrator {
    store: TtlStore,
    durable: Arc<dyn DurableStore>,
    origin: Arc<dyn Origin>,
    default_ttl: Duration,
}

impl CacheOrchestrator {
    /// Creates an orchestrator over the given tiers.
    ///
    /// `default_ttl` governs every memory write this orchestrator performs;
    /// zero disables expiry for those entries.
    pub fn new(
        store: TtlStore,
        durable: Arc<dyn DurableStore>,
        origin: Arc<dyn Origin>,
        default_ttl: Duration,
    ) -> Self {
        Self {
            store,
            durable,
            origin,
            default_ttl,
        }
    }

    /// The store this orchestrator populates.
    pub fn store(&self) -> &TtlStore {
        &self.store
    }

    /// Resolves one request through the tiers.
    ///
    /// `path` is the request path with its leading slash; `raw_query` is the
    /// query string as received (an empty string is a valid query and still
    /// participates in the fingerprint). The store lock is never held across
    /// any of the awaited tier calls; each store operation acquires and
    /// releases internally.
    pub async fn lookup(&self, path: &str, raw_query: &str) -> Result<CacheOutcome> {
        let query = encode_query(raw_query);
        let fingerprint = Fingerprint::derive(path, &query);

        // Tier 1: memory
        if let Some(value) = self.store.get(&fingerprint.key).await {
            debug!(key = %fingerprint.key, "memory hit");
            return Ok(CacheOutcome {
                key: fingerprint.key,
                value,
                status: CacheStatus::MemoryHit,
            });
        }

        // Tier 2: durable. Transport failures degrade to a miss on the read
        // path; the request must not fail just because the table service is
        // down while the origin is up.
        match self.durable.get(&fingerprint.partition, &fingerprint.key).await {
            Ok(record) => {
                debug!(key = %fingerprint.key, "durable hit");
                self.store
                    .set(&fingerprint.key, record.value.clone(), Some(self.default_ttl))
                    .await;
                return Ok(CacheOutcome {
                    key: fingerprint.key,
                    value: record.value,
                    status: CacheStatus::DurableHit,
                });
            }
            Err(DurableError::NotFound(_, _)) => {
                debug!(key = %fingerprint.key, "durable miss");
            }
            Err(DurableError::Transport(reason)) => {
                warn!(key = %fingerprint.key, %reason, "durable read failed, falling through to origin");
            }
        }

        // Tier 3: origin. Any failure is terminal; nothing is populated.
        let payload = self.origin.fetch(path, &query).await?;
        let value = serde_json::to_string(&payload)
            .map_err(|e| CacheError::Internal(format!("serializing origin payload: {e}")))?;

        // Durable tier first; a write failure fails the request.
        self.durable
            .put(&fingerprint.partition, &fingerprint.key, &value)
            .await
            .map_err(CacheError::Persistence)?;

        self.store
            .set(&fingerprint.key, value.clone(), Some(self.default_ttl))
            .await;

        debug!(key = %fingerprint.key, "miss resolved from origin");
        Ok(CacheOutcome {
            key: fingerprint.key,
            value,
            status: CacheStatus::Miss,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::durable::{DurableRecord, MemoryDurableStore};
    use crate::error::OriginError;

    /// Origin double that counts fetches and returns a fixed payload.
    struct CountingOrigin {
        calls: AtomicUsize,
        payload: Value,
    }

    impl CountingOrigin {
        fn new(payload: Value) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                payload,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Origin for CountingOrigin {
        async fn fetch(
            &self,
            _path: &str,
            _query: &str,
        ) -> std::result::Result<Value, OriginError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.payload.clone())
        }
    }

    /// Origin double that always fails.
    struct FailingOrigin;

    #[async_trait]
    impl Origin for FailingOrigin {
        async fn fetch(
            &self,
            _path: &str,
            _query: &str,
        ) -> std::result::Result<Value, OriginError> {
            Err(OriginError::Status(reqwest::StatusCode::BAD_GATEWAY))
        }
    }

    /// Durable double whose reads and writes fail with transport errors.
    struct BrokenDurable {
        fail_reads: bool,
        fail_writes: bool,
    }

    #[async_trait]
    impl DurableStore for BrokenDurable {
        async fn get(
            &self,
            partition_key: &str,
            row_key: &str,
        ) -> std::result::Result<DurableRecord, DurableError> {
            if self.fail_reads {
                Err(DurableError::Transport("read refused".to_string()))
            } else {
                Err(DurableError::NotFound(
                    partition_key.to_string(),
                    row_key.to_string(),
                ))
            }
        }

        async fn put(
            &self,
            _partition_key: &str,
            _row_key: &str,
            _value: &str,
        ) -> std::result::Result<(), DurableError> {
            if self.fail_writes {
                Err(DurableError::Transport("write refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn orchestrator(
        durable: Arc<dyn DurableStore>,
        origin: Arc<dyn Origin>,
    ) -> CacheOrchestrator {
        CacheOrchestrator::new(TtlStore::new(), durable, origin, Duration::from_secs(600))
    }

    #[tokio::test]
    async fn test_full_miss_populates_both_tiers() {
        let durable = Arc::new(MemoryDurableStore::new());
        let origin = Arc::new(CountingOrigin::new(json!({"name": "gear"})));
        let orch = orchestrator(durable.clone(), origin.clone());

        let outcome = orch.lookup("/widgets", "id=7").await.unwrap();

        assert_eq!(outcome.status, CacheStatus::Miss);
        assert_eq!(outcome.key, "_widgets_id_7");
        assert_eq!(outcome.value, r#"{"name":"gear"}"#);
        assert_eq!(origin.calls(), 1);

        // Both tiers now hold the value
        let record = durable.get("_widgets", "_widgets_id_7").await.unwrap();
        assert_eq!(record.value, r#"{"name":"gear"}"#);
        assert_eq!(
            orch.store().get("_widgets_id_7").await.as_deref(),
            Some(r#"{"name":"gear"}"#)
        );
    }

    #[tokio::test]
    async fn test_memory_hit_skips_collaborators() {
        let durable = Arc::new(MemoryDurableStore::new());
        let origin = Arc::new(CountingOrigin::new(json!({"name": "gear"})));
        let orch = orchestrator(durable, origin.clone());

        orch.lookup("/widgets", "id=7").await.unwrap();
        let outcome = orch.lookup("/widgets", "id=7").await.unwrap();

        assert_eq!(outcome.status, CacheStatus::MemoryHit);
        assert_eq!(outcome.value, r#"{"name":"gear"}"#);
        assert_eq!(origin.calls(), 1, "repeat lookup must not reach the origin");
    }

    #[tokio::test]
    async fn test_durable_hit_backfills_memory() {
        let durable = Arc::new(MemoryDurableStore::new());
        durable
            .put("_widgets", "_widgets_id_7", r#"{"name":"gear"}"#)
            .await
            .unwrap();
        let origin = Arc::new(CountingOrigin::new(json!({"unreached": true})));
        let orch = orchestrator(durable, origin.clone());

        let outcome = orch.lookup("/widgets", "id=7").await.unwrap();
        assert_eq!(outcome.status, CacheStatus::DurableHit);
        assert_eq!(outcome.value, r#"{"name":"gear"}"#);
        assert_eq!(origin.calls(), 0);

        // Back-fill means the next identical request is a memory hit
        let outcome = orch.lookup("/widgets", "id=7").await.unwrap();
        assert_eq!(outcome.status, CacheStatus::MemoryHit);
        assert_eq!(origin.calls(), 0);
    }

    #[tokio::test]
    async fn test_durable_read_failure_degrades_to_origin() {
        let durable = Arc::new(BrokenDurable {
            fail_reads: true,
            fail_writes: false,
        });
        let origin = Arc::new(CountingOrigin::new(json!({"name": "gear"})));
        let orch = orchestrator(durable, origin.clone());

        let outcome = orch.lookup("/widgets", "id=7").await.unwrap();
        assert_eq!(outcome.status, CacheStatus::Miss);
        assert_eq!(origin.calls(), 1);
    }

    #[tokio::test]
    async fn test_origin_failure_populates_nothing() {
        let durable = Arc::new(MemoryDurableStore::new());
        let orch = orchestrator(durable.clone(), Arc::new(FailingOrigin));

        let err = orch.lookup("/widgets", "id=7").await.unwrap_err();
        assert!(matches!(err, CacheError::Origin(_)));

        assert!(durable.is_empty().await);
        assert!(orch.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_durable_write_failure_fails_request_and_skips_memory() {
        let durable = Arc::new(BrokenDurable {
            fail_reads: false,
            fail_writes: true,
        });
        let origin = Arc::new(CountingOrigin::new(json!({"name": "gear"})));
        let orch = orchestrator(durable, origin);

        let err = orch.lookup("/widgets", "id=7").await.unwrap_err();
        assert!(matches!(err, CacheError::Persistence(_)));

        // The fetched value is discarded, not served memory-only
        assert!(orch.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_empty_query_is_a_distinct_entry() {
        let durable = Arc::new(MemoryDurableStore::new());
        let origin = Arc::new(CountingOrigin::new(json!([1, 2, 3])));
        let orch = orchestrator(durable, origin.clone());

        let with_query = orch.lookup("/widgets", "id=7").await.unwrap();
        let without_query = orch.lookup("/widgets", "").await.unwrap();

        assert_ne!(with_query.key, without_query.key);
        assert_eq!(without_query.key, "_widgets_");
        assert_eq!(origin.calls(), 2);
    }

    #[tokio::test]
    async fn test_parameter_order_is_not_normalized() {
        let durable = Arc::new(MemoryDurableStore::new());
        let origin = Arc::new(CountingOrigin::new(json!({})));
        let orch = orchestrator(durable, origin.clone());

        orch.lookup("/widgets", "a=1&b=2").await.unwrap();
        let outcome = orch.lookup("/widgets", "b=2&a=1").await.unwrap();

        // Same parameters, different order: separate entries, second fetch
        assert_eq!(outcome.status, CacheStatus::Miss);
        assert_eq!(origin.calls(), 2);
    }

    #[test]
    fn test_status_header_values() {
        assert_eq!(CacheStatus::MemoryHit.header_value(), "Hit");
        assert_eq!(CacheStatus::DurableHit.header_value(), "Table Hit");
        assert_eq!(CacheStatus::Miss.header_value(), "Miss");
    }
}
