//! tiercache - A read-through cache service
//!
//! Serves repeated requests from an in-memory TTL tier and a durable table
//! tier before falling back to the origin service.

mod api;
mod cache;
mod config;
mod durable;
mod error;
mod models;
mod origin;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use cache::{CacheOrchestrator, TtlStore};
use config::Config;
use durable::{DurableStore, MemoryDurableStore, RestTableClient};
use origin::HttpOrigin;
use tasks::spawn_sweep_task;

/// Main entry point for the tiercache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the TTL store and the durable/origin clients
/// 4. Start the background sweep task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiercache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tiercache service");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: default_ttl={}s, sweep_interval={}s, port={}, origin={}",
        config.default_ttl, config.sweep_interval, config.server_port, config.origin_base_url
    );

    // The in-memory tier, shared by the orchestrator and the sweep task
    let store = TtlStore::new();

    // The durable tier: REST table service when configured, otherwise a
    // process-local fallback
    let durable: Arc<dyn DurableStore> = match &config.table_endpoint {
        Some(endpoint) => {
            info!("Durable tier: table service at {} (table '{}')", endpoint, config.table_name);
            Arc::new(RestTableClient::new(
                endpoint,
                &config.table_name,
                Duration::from_secs(config.table_timeout),
            )?)
        }
        None => {
            warn!("TABLE_ENDPOINT not set; durable tier is process-local memory");
            Arc::new(MemoryDurableStore::new())
        }
    };

    let origin = HttpOrigin::new(
        config.origin_base_url.clone(),
        Duration::from_secs(config.origin_timeout),
    )?;

    let orchestrator = CacheOrchestrator::new(
        store.clone(),
        durable,
        Arc::new(origin),
        config.default_ttl_duration(),
    );

    // Start background sweep task
    let sweep_handle = spawn_sweep_task(store, config.sweep_interval);
    info!("Background sweep task started");

    // Create router with all endpoints
    let app = create_router(AppState::new(orchestrator));

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweep task
    sweep_handle.abort();
    warn!("Sweep task aborted");
}
