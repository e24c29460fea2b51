//! Cache Entry Module
//!
//! Defines the structure for individual in-memory cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single in-memory cache entry: an opaque value plus its expiry instant.
///
/// The store never inspects the value's structure; it is carried as the
/// canonical serialized string produced upstream.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value (canonical JSON string)
    pub value: String,
    /// Creation instant
    pub created_at: Instant,
    /// Absolute expiry instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry with an optional TTL.
    ///
    /// A `ttl` of `None` or zero means the entry never expires; degenerate
    /// TTLs degrade to "never expires" rather than erroring.
    pub fn new(value: String, ttl: Option<Duration>) -> Self {
        let now = Instant::now();
        let expires_at = match ttl {
            Some(ttl) if !ttl.is_zero() => Some(now + ttl),
            _ => None,
        };

        Self {
            value,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// the instant the TTL fully elapses the entry must no longer be served.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    /// Checks whether the entry has expired as of the current instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if the entry never expires.
    ///
    /// Returns `Some(Duration::ZERO)` once the entry has expired.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
