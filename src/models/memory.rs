// Memory snapshot model

use serde::{Deserialize, Serialize};

/// Point-in-time view of /proc/meminfo, all values in bytes.
///
/// `swap_used_bytes` is signed: it is `SwapTotal - SwapFree` exactly as the
/// kernel reported them and goes negative if the counters disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub available_bytes: u64,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: i64,
    /// Monotonic clock reading (ms) of the refresh that produced this snapshot.
    pub captured_at_millis: u64,
}

impl MemorySnapshot {
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    pub fn usage_percent(&self) -> f64 {
        if self.total_bytes > 0 {
            (self.used_bytes() as f64 / self.total_bytes as f64) * 100.0
        } else {
            0.0
        }
    }
}
