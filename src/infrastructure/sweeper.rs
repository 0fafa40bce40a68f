//! Background pruning of stale uploads.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::port::outbound::AssetStore;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// How often to sweep for a given retention: half the retention, clamped
/// to between one second and one hour.
#[must_use]
pub fn sweep_interval(retention: Duration) -> Duration {
    (retention / 2).clamp(MIN_SWEEP_INTERVAL, MAX_SWEEP_INTERVAL)
}

/// Spawn a task that deletes assets older than `retention` forever.
///
/// Abort the returned handle to stop it.
pub fn spawn_sweeper(store: Arc<dyn AssetStore>, retention: Duration) -> JoinHandle<()> {
    let period = sweep_interval(retention);
    info!(
        retention_secs = retention.as_secs(),
        interval_secs = period.as_secs(),
        "Asset sweeper started"
    );

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            match store.prune_older_than(retention).await {
                Ok(0) => debug!("No stale assets"),
                Ok(removed) => info!(removed, "Pruned stale assets"),
                Err(e) => warn!(error = %e, "Asset sweep failed"),
            }
        }
    })
}
