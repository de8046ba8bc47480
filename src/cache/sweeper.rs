use crate::cache::ResultCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Starts a background task that periodically removes old cache entries
///
/// The first sweep runs one `interval` after the call. The task runs until the
/// returned handle is aborted or the runtime shuts down.
///
/// # Arguments
///
/// * `cache` - The cache to sweep, shared with the analyzer
/// * `interval` - Time between two sweeps
/// * `max_age` - Entries older than this are removed
pub fn spawn_sweeper<T>(
    cache: Arc<ResultCache<T>>,
    interval: Duration,
    max_age: Duration,
) -> JoinHandle<()>
where
    T: Clone + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = cache.sweep_expired(max_age);
            tracing::info!(
                "Cache swept: {} expired entries removed, {} remaining",
                removed,
                cache.len()
            );
        }
    })
}
