//! Response DTOs for the cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::StatsSnapshot;

/// Response body for a resolved cache request (GET /api/*path)
#[derive(Debug, Clone, Serialize)]
pub struct CacheResponse {
    /// Which tier answered, in words
    pub message: String,
    /// The fingerprint key the value is cached under
    pub key: String,
    /// The cached payload, embedded as JSON rather than a string
    pub value: Value,
}

impl CacheResponse {
    /// Creates a new CacheResponse
    pub fn new(message: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            message: message.into(),
            key: key.into(),
            value,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of memory-tier hits
    pub hits: u64,
    /// Number of memory-tier misses
    pub misses: u64,
    /// Number of entries removed by expiry
    pub expired: u64,
    /// Current number of entries in the memory tier
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(snapshot: StatsSnapshot) -> Self {
        let hit_rate = snapshot.hit_rate();
        Self {
            hits: snapshot.hits,
            misses: snapshot.misses,
            expired: snapshot.expired,
            total_entries: snapshot.total_entries,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
