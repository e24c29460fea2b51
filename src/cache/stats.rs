//! Cache Statistics Module
//!
//! Tracks store performance counters: hits, misses, and expired removals.
//!
//! Counters are atomics so that `get` can record a hit while holding only the
//! store's read lock.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Live counters for the TTL store.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Adds to the expired-removal counter (lazy expiry and sweep).
    pub fn record_expired(&self, count: u64) {
        self.expired.fetch_add(count, Ordering::Relaxed);
    }

    /// Takes a point-in-time snapshot of the counters.
    pub fn snapshot(&self, total_entries: usize) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            total_entries,
        }
    }
}

// == Stats Snapshot ==
/// A point-in-time view of the store counters.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    /// Number of successful store reads
    pub hits: u64,
    /// Number of failed store reads (absent or expired)
    pub misses: u64,
    /// Number of entries removed because their TTL elapsed
    pub expired: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
}

impl StatsSnapshot {
    /// Calculates the hit rate: hits / (hits + misses), 0.0 with no reads.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        let snapshot = stats.snapshot(0);
        assert_eq!(snapshot.hits, 0);
        assert_eq!(snapshot.misses, 0);
        assert_eq!(snapshot.expired, 0);
        assert_eq!(snapshot.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.snapshot(0).hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.snapshot(1).hit_rate(), 0.5);
    }

    #[test]
    fn test_record_expired() {
        let stats = CacheStats::new();
        stats.record_expired(1);
        stats.record_expired(3);
        assert_eq!(stats.snapshot(0).expired, 4);
    }

    #[test]
    fn test_snapshot_total_entries() {
        let stats = CacheStats::new();
        assert_eq!(stats.snapshot(42).total_entries, 42);
    }
}
