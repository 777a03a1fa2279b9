//! Periodic eviction of idle sessions

use crate::session::SessionStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn a task that sweeps `store` every `interval`, evicting sessions idle
/// for longer than `max_age`. Runs until aborted.
pub fn spawn_sweeper<S>(store: Arc<S>, interval: Duration, max_age: Duration) -> JoinHandle<()>
where
    S: SessionStore + 'static,
{
    let max_age = chrono::Duration::from_std(max_age).unwrap_or(chrono::Duration::MAX);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing is stale at startup
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = store.sweep(Utc::now(), max_age);
            if evicted > 0 {
                tracing::info!(evicted, remaining = store.len(), "Swept idle sessions");
            } else {
                tracing::debug!(remaining = store.len(), "Session sweep found nothing idle");
            }
        }
    })
}
