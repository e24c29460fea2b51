//! TTL Sweep Task
//!
//! Background task that periodically purges expired memory-tier entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::TtlStore;

/// Spawns the background task that drives repeated sweeps of the TTL store.
///
/// The task runs for the lifetime of the process, sleeping for the given
/// interval between sweeps. Each sweep acquires the store's write lock only
/// for the scan itself, so in-flight reads and writes are delayed by at most
/// one sweep's duration.
///
/// # Arguments
/// * `store` - The TTL store to sweep
/// * `interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task; aborting it during graceful shutdown
/// stops the loop and releases the underlying timer.
pub fn spawn_sweep_task(store: TtlStore, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {} seconds", interval_secs);

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let removed = store.sweep().await;

            if removed > 0 {
                info!("TTL sweep: removed {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        let store = TtlStore::new();

        store
            .set("expire_soon", "value".to_string(), Some(Duration::from_millis(100)))
            .await;

        // Spawn sweep task with 1 second interval
        let handle = spawn_sweep_task(store.clone(), 1);

        // Wait for the entry to expire and a sweep to run
        tokio::time::sleep(Duration::from_millis(1500)).await;

        // The sweep removed it without any read touching the key
        assert_eq!(store.len().await, 0);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        let store = TtlStore::new();

        store
            .set("long_lived", "value".to_string(), Some(Duration::from_secs(3600)))
            .await;

        let handle = spawn_sweep_task(store.clone(), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(store.get("long_lived").await.as_deref(), Some("value"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let store = TtlStore::new();

        let handle = spawn_sweep_task(store, 1);

        // Abort immediately
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
