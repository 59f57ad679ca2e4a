//! Cache Cleanup Task
//!
//! Background task that periodically drops expired item cache entries so
//! that items nobody reads again do not hold memory until evicted.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryCache;

/// Spawns a task that purges expired entries from `cache` every
/// `interval_secs` seconds.
///
/// Returns the task handle so it can be aborted during graceful shutdown.
pub fn spawn_cleanup_task(cache: Arc<MemoryCache>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.purge_expired().await;
            if removed > 0 {
                let stats = cache.stats().await;
                info!(
                    removed,
                    entries = stats.entries,
                    hit_rate = stats.hit_rate(),
                    "Cache cleanup removed expired entries"
                );
            } else {
                debug!("Cache cleanup: no expired entries found");
            }
        }
    })
}
