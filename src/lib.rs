//! tiercache - A read-through cache service
//!
//! Serves repeated requests from an in-memory TTL tier and a durable table
//! tier before falling back to the origin service.

pub mod api;
pub mod cache;
pub mod config;
pub mod durable;
pub mod error;
pub mod models;
pub mod origin;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheOrchestrator, CacheStatus, TtlStore};
pub use config::Config;
pub use tasks::spawn_sweep_task;
