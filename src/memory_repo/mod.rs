// Memory snapshot from /proc/meminfo, re-read at most once per staleness window.
//
// Not synchronised: callers sharing one aggregator wrap it in a Mutex (see worker).

mod meminfo;

pub use meminfo::{MeminfoCounters, parse_meminfo};

use crate::clock::{Clock, MonotonicClock};
use crate::line_source::{FsLineSource, LineSource};
use crate::models::MemorySnapshot;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const MEMINFO_PATH: &str = "/proc/meminfo";
/// Minimum time between two reads of the source.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 100;

pub struct MemoryAggregator<S = FsLineSource, C = MonotonicClock> {
    source: S,
    clock: C,
    path: PathBuf,
    refresh_interval_ms: u64,
    /// `None` until the first successful read.
    current: Option<MemorySnapshot>,
}

impl Default for MemoryAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAggregator {
    /// Reads the real /proc/meminfo.
    pub fn new() -> Self {
        Self::with_source(FsLineSource, MonotonicClock::new(), MEMINFO_PATH)
    }
}

impl<S: LineSource, C: Clock> MemoryAggregator<S, C> {
    pub fn with_source(source: S, clock: C, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            clock,
            path: path.into(),
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            current: None,
        }
    }

    pub fn with_refresh_interval_ms(mut self, refresh_interval_ms: u64) -> Self {
        self.refresh_interval_ms = refresh_interval_ms;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the source unless the cached snapshot is younger than the refresh
    /// interval. An empty read keeps the previous snapshot and its timestamp.
    #[instrument(skip(self), fields(repo = "memory", operation = "refresh"))]
    pub fn refresh(&mut self) -> MemorySnapshot {
        let now = self.clock.now_millis();
        if let Some(current) = self.current {
            let age_ms = now.saturating_sub(current.captured_at_millis);
            if age_ms < self.refresh_interval_ms {
                tracing::trace!(age_ms, "meminfo still fresh");
                return current;
            }
        }

        let lines = self.source.read_lines(&self.path);
        if lines.is_empty() {
            tracing::debug!(
                path = %self.path.display(),
                "meminfo unavailable; keeping last snapshot"
            );
            return self.current_snapshot();
        }

        let snapshot = parse_meminfo(&lines).to_snapshot(now);
        self.current = Some(snapshot);
        snapshot
    }

    /// Last snapshot produced by [`refresh`](Self::refresh); all zeros before the first one.
    pub fn current_snapshot(&self) -> MemorySnapshot {
        self.current.unwrap_or_default()
    }
}
