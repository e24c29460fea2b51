//! API Module
//!
//! HTTP handlers and routing for the service's REST surface.
//!
//! # Endpoints
//! - `GET /api/*path` - Cache-aside lookup
//! - `GET /stats` - Memory-tier statistics
//! - `GET /health` - Health check endpoint
//! - `GET /liveness` - Liveness probe

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
