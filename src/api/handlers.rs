//! API Handlers
//!
//! HTTP request handlers for each service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::cache::{CacheOrchestrator, CacheStatus};
use crate::error::{CacheError, Result};
use crate::models::{CacheResponse, HealthResponse, StatsResponse};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache-aside engine behind the API
    pub orchestrator: Arc<CacheOrchestrator>,
}

impl AppState {
    /// Creates a new AppState over the given orchestrator.
    pub fn new(orchestrator: CacheOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

fn status_message(status: CacheStatus) -> &'static str {
    match status {
        CacheStatus::MemoryHit => "Cache hit (memory)",
        CacheStatus::DurableHit => "Cache hit (durable tier)",
        CacheStatus::Miss => "Cache miss (fetched from origin)",
    }
}

/// Handler for GET /api/*path
///
/// Resolves the request through the cache tiers and reports which tier
/// answered in the `X-Cache-Status` response header.
pub async fn cache_handler(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse> {
    // The wildcard strips the leading slash; the fingerprint and the origin
    // URL both expect the path as the client sent it.
    let path = format!("/{rest}");
    let query = query.unwrap_or_default();

    let outcome = state.orchestrator.lookup(&path, &query).await?;

    // The stored value is canonical JSON; embed it as JSON rather than
    // double-encoding it as a string.
    let value: Value = serde_json::from_str(&outcome.value)
        .map_err(|e| CacheError::Internal(format!("cached payload is not valid JSON: {e}")))?;

    let body = CacheResponse::new(status_message(outcome.status), outcome.key, value);
    Ok((
        [("x-cache-status", outcome.status.header_value())],
        Json(body),
    ))
}

/// Handler for GET /stats
///
/// Returns current memory-tier statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.orchestrator.store().stats().await;
    Json(StatsResponse::from(snapshot))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Handler for GET /liveness
///
/// Bare 200 to indicate the process is alive.
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}
