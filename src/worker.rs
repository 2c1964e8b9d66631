// Background memory sampler. Each tick refreshes the shared aggregator on the
// blocking pool; the aggregator's own staleness window still applies.

use crate::clock::Clock;
use crate::line_source::LineSource;
use crate::memory_repo::MemoryAggregator;
use crate::models::MemorySnapshot;
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, watch};
use tokio::time::{Duration, interval};
use tracing::Instrument;

pub type SharedAggregator<S, C> = Arc<Mutex<MemoryAggregator<S, C>>>;

pub struct WorkerDeps<S, C> {
    pub memory: SharedAggregator<S, C>,
    /// Latest snapshot for readers that must not block on the aggregator lock.
    pub tx: watch::Sender<MemorySnapshot>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub sample_interval_ms: u64,
    /// How often to log sampler stats (real seconds).
    pub stats_log_interval_secs: u64,
}

async fn sample<S, C>(memory: &SharedAggregator<S, C>) -> anyhow::Result<MemorySnapshot>
where
    S: LineSource + 'static,
    C: Clock + 'static,
{
    let memory = memory.clone();
    tokio::task::spawn_blocking(move || {
        let mut aggregator = memory
            .lock()
            .map_err(|e| anyhow::anyhow!("memory aggregator lock poisoned: {}", e))?;
        Ok(aggregator.refresh())
    })
    .await
    .map_err(|e| anyhow::anyhow!("memory sample task join: {}", e))?
}

pub fn spawn<S, C>(deps: WorkerDeps<S, C>, config: WorkerConfig) -> tokio::task::JoinHandle<()>
where
    S: LineSource + 'static,
    C: Clock + 'static,
{
    let WorkerDeps {
        memory,
        tx,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        sample_interval_ms,
        stats_log_interval_secs,
    } = config;

    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", sample_interval_ms);
    tokio::spawn(
        async move {
            let mut tick = interval(Duration::from_millis(sample_interval_ms));
            tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
            stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            let mut samples_total: u64 = 0;
            let mut sample_failures_total: u64 = 0;

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        match sample(&memory).await {
                            Ok(snapshot) => {
                                samples_total += 1;
                                tracing::debug!(
                                    operation = "sample_memory",
                                    total_bytes = snapshot.total_bytes,
                                    available_bytes = snapshot.available_bytes,
                                    swap_used_bytes = snapshot.swap_used_bytes,
                                    "memory sampled"
                                );
                                tx.send_replace(snapshot);
                            }
                            Err(e) => {
                                sample_failures_total += 1;
                                tracing::warn!(
                                    error = %e,
                                    operation = "sample_memory",
                                    "memory sample failed"
                                );
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Worker shutting down");
                        break;
                    }
                    _ = stats_log_tick.tick() => {
                        let latest = *tx.borrow();
                        tracing::info!(
                            samples_total,
                            sample_failures_total,
                            usage_percent = latest.usage_percent(),
                            snapshot = %serde_json::to_string(&latest).unwrap_or_default(),
                            "sampler stats"
                        );
                    }
                }
            }
        }
        .instrument(worker_span),
    )
}
