use anyhow::Result;
use hwprobe::*;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        meminfo = %app_config.sources.meminfo_path,
        "{} starting",
        env!("CARGO_PKG_NAME")
    );

    match displays::scan_displays(Path::new(&app_config.sources.drm_path)) {
        Ok(found) => displays::report_displays(&found)?,
        Err(e) => tracing::warn!(error = %e, operation = "scan_displays", "display scan failed"),
    }

    let aggregator = memory_repo::MemoryAggregator::with_source(
        line_source::FsLineSource,
        clock::MonotonicClock::new(),
        &app_config.sources.meminfo_path,
    )
    .with_refresh_interval_ms(app_config.memory.refresh_interval_ms);
    let memory = Arc::new(Mutex::new(aggregator));
    let (tx, _rx) = watch::channel(models::MemorySnapshot::default());
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            memory,
            tx,
            shutdown_rx,
        },
        worker::WorkerConfig {
            sample_interval_ms: app_config.monitoring.sample_interval_ms,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    let _ = worker_handle.await;
    Ok(())
}
