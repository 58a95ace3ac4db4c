//! Hygiene Sweep Task
//!
//! Background task that periodically purges expired cache entries and
//! abandoned pending-request bookkeeping. Lazy expiry on read is the
//! correctness mechanism; this sweep only reclaims memory between reads.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that sweeps the store on a fixed interval.
///
/// Returns a JoinHandle used to abort the task during graceful shutdown.
pub fn spawn_sweep_task<T>(store: Arc<CacheStore<T>>, interval_secs: u64) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(interval_secs, "starting cache hygiene sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let (entries_removed, pending_removed) = store.clean_expired().await;

            if entries_removed > 0 || pending_removed > 0 {
                info!(
                    entries_removed,
                    pending_removed, "hygiene sweep removed stale state"
                );
            } else {
                debug!("hygiene sweep found nothing stale");
            }
        }
    })
}
