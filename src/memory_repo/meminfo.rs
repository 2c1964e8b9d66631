// /proc/meminfo line scanning

use crate::models::MemorySnapshot;

/// Raw counters from one pass over /proc/meminfo, in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeminfoCounters {
    pub mem_total: u64,
    pub mem_free: u64,
    /// `None` on kernels older than 3.14, which lack the `MemAvailable:` line.
    pub mem_available: Option<u64>,
    pub active_file: u64,
    pub inactive_file: u64,
    pub s_reclaimable: u64,
    pub swap_total: u64,
    pub swap_free: u64,
}

impl MeminfoCounters {
    /// `MemAvailable` when reported, else the kernel's own estimate rebuilt from
    /// free + file-backed LRU pages + reclaimable slab.
    pub fn available(&self) -> u64 {
        self.mem_available.unwrap_or_else(|| {
            self.mem_free
                .saturating_add(self.active_file)
                .saturating_add(self.inactive_file)
                .saturating_add(self.s_reclaimable)
        })
    }

    /// Not clamped: inconsistent counters surface as a negative value.
    pub fn swap_used(&self) -> i64 {
        to_i64(self.swap_total).saturating_sub(to_i64(self.swap_free))
    }

    pub fn to_snapshot(&self, captured_at_millis: u64) -> MemorySnapshot {
        MemorySnapshot {
            total_bytes: self.mem_total,
            free_bytes: self.mem_free,
            available_bytes: self.available(),
            swap_total_bytes: self.swap_total,
            swap_used_bytes: self.swap_used(),
            captured_at_millis,
        }
    }
}

fn to_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// Scan every line; later occurrences of a key overwrite earlier ones.
pub fn parse_meminfo<S: AsRef<str>>(lines: &[S]) -> MeminfoCounters {
    let mut counters = MeminfoCounters::default();
    for line in lines {
        let tokens: Vec<&str> = line.as_ref().split_whitespace().collect();
        if tokens.len() < 2 {
            continue;
        }
        let slot = match tokens[0] {
            "MemTotal:" => &mut counters.mem_total,
            "MemFree:" => &mut counters.mem_free,
            "MemAvailable:" => counters.mem_available.insert(0),
            "Active(file):" => &mut counters.active_file,
            "Inactive(file):" => &mut counters.inactive_file,
            "SReclaimable:" => &mut counters.s_reclaimable,
            "SwapTotal:" => &mut counters.swap_total,
            "SwapFree:" => &mut counters.swap_free,
            _ => continue,
        };
        *slot = parse_value(&tokens);
    }
    counters
}

/// Second column as an integer, times 1024 when the third column is `kB`.
/// Unparseable values count as 0.
fn parse_value(tokens: &[&str]) -> u64 {
    let value: u64 = match tokens[1].parse() {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(
                field = tokens[0],
                value = tokens[1],
                error = %e,
                operation = "parse_meminfo",
                "Unable to parse meminfo value"
            );
            return 0;
        }
    };
    if tokens.get(2) == Some(&"kB") {
        value.saturating_mul(1024)
    } else {
        value
    }
}
