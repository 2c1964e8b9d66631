use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_meminfo_path")]
    pub meminfo_path: String,
    #[serde(default = "default_drm_path")]
    pub drm_path: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            meminfo_path: default_meminfo_path(),
            drm_path: default_drm_path(),
        }
    }
}

fn default_meminfo_path() -> String {
    crate::memory_repo::MEMINFO_PATH.into()
}

fn default_drm_path() -> String {
    crate::displays::DRM_PATH.into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Staleness window: /proc/meminfo is re-read at most this often.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

fn default_refresh_interval_ms() -> u64 {
    crate::memory_repo::DEFAULT_REFRESH_INTERVAL_MS
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub sample_interval_ms: u64,
    /// How often to log sampler stats at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.sources.meminfo_path.is_empty(),
            "sources.meminfo_path must be non-empty"
        );
        anyhow::ensure!(
            !self.sources.drm_path.is_empty(),
            "sources.drm_path must be non-empty"
        );
        anyhow::ensure!(
            self.memory.refresh_interval_ms > 0,
            "memory.refresh_interval_ms must be > 0, got {}",
            self.memory.refresh_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
