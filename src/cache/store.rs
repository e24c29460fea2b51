//! TTL Store Module
//!
//! The in-memory cache tier: a concurrent key-value map where every entry
//! carries an absolute expiry instant.
//!
//! The map is guarded by a single reader/writer lock held internally, so any
//! number of `get` calls proceed concurrently while `set`/`delete`/`clear`/
//! `sweep` are mutually exclusive with all other operations. Callers never
//! touch the lock directly and none of these operations can fail.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::cache::{CacheEntry, CacheStats, StatsSnapshot};

// == TTL Store ==
/// Concurrent in-memory store with per-entry TTL expiry.
///
/// Cloning is cheap and every clone operates on the same underlying map,
/// which is how the store is shared between request handlers and the
/// background sweep task.
#[derive(Debug, Clone, Default)]
pub struct TtlStore {
    /// Key-value storage behind the store's single reader/writer lock
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    /// Performance counters
    stats: Arc<CacheStats>,
}

impl TtlStore {
    // == Constructor ==
    /// Creates an empty TtlStore.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get ==
    /// Retrieves a value by key, treating expired entries as absent.
    ///
    /// An entry whose expiry instant has passed is never returned, even if
    /// the background sweep has not reached it yet; it is removed here as a
    /// side effect (lazy expiry) before `None` comes back.
    pub async fn get(&self, key: &str) -> Option<String> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => {
                    self.stats.record_hit();
                    return Some(entry.value.clone());
                }
                Some(_) => {
                    // Expired: fall through to remove it under the write lock
                }
                None => {
                    self.stats.record_miss();
                    return None;
                }
            }
        }

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.is_expired() {
                entries.remove(key);
                self.stats.record_expired(1);
            } else {
                // A writer replaced the entry between the two lock
                // acquisitions; the fresh value wins.
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
        }

        self.stats.record_miss();
        None
    }

    // == Set ==
    /// Stores a value under `key`, unconditionally replacing any existing
    /// entry.
    ///
    /// A `ttl` of `None` or zero means the entry never expires.
    pub async fn set(&self, key: impl Into<String>, value: String, ttl: Option<Duration>) {
        let entry = CacheEntry::new(value, ttl);
        let mut entries = self.entries.write().await;
        entries.insert(key.into(), entry);
    }

    // == Delete ==
    /// Removes the entry for `key` if present; returns whether it existed.
    pub async fn delete(&self, key: &str) -> bool {
        let mut entries = self.entries.write().await;
        entries.remove(key).is_some()
    }

    // == Clear ==
    /// Atomically removes all entries.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    // == Sweep ==
    /// Removes every entry whose expiry has passed relative to the sweep's
    /// start instant. Returns the number of entries removed.
    pub async fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - entries.len();

        if removed > 0 {
            self.stats.record_expired(removed as u64);
        }
        removed
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included until
    /// the next sweep or lazy-expiry read removes them.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    // == Stats ==
    /// Returns a point-in-time snapshot of the store counters.
    pub async fn stats(&self) -> StatsSnapshot {
        let total = self.entries.read().await.len();
        self.stats.snapshot(total)
    }
}
