//! Error types for the cache service
//!
//! Provides unified error handling using thiserror.
//!
//! Three layers: `DurableError` is the durable tier's contract error,
//! `OriginError` is the origin fetch contract error, and `CacheError` is the
//! request-level taxonomy the HTTP surface renders.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Durable Tier Error ==
/// Errors from the durable tier contract.
///
/// `NotFound` is a normal miss; `Transport` covers an unreachable store or a
/// malformed response. On the read path the orchestrator recovers from both
/// by falling through to the origin; on the write path `Transport` fails the
/// request.
#[derive(Error, Debug)]
pub enum DurableError {
    /// Record absent from the durable store
    #[error("record not found: {0}/{1}")]
    NotFound(String, String),

    /// Store unreachable or the response could not be understood
    #[error("durable store transport failure: {0}")]
    Transport(String),
}

// == Origin Error ==
/// Errors from the origin fetch. Any of these is terminal for the request:
/// no tier is populated and no retry is attempted.
#[derive(Error, Debug)]
pub enum OriginError {
    /// Origin unreachable or the request timed out
    #[error("origin unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Origin answered with a non-success status
    #[error("origin returned status {0}")]
    Status(StatusCode),

    /// Origin answered 2xx but the body was not parseable JSON
    #[error("origin returned an unparseable body: {0}")]
    Body(String),
}

// == Cache Error ==
/// Request-level error taxonomy rendered by the HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The origin fetch failed; nothing was cached
    #[error("origin fetch failed: {0}")]
    Origin(#[from] OriginError),

    /// The durable write failed after a successful origin fetch; the fetched
    /// value is discarded rather than served memory-only
    #[error("durable write failed: {0}")]
    Persistence(DurableError),

    /// Anything else
    #[error("internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Origin(_) => StatusCode::BAD_GATEWAY,
            CacheError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache service.
pub type Result<T> = std::result::Result<T, CacheError>;
