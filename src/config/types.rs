use crate::analysis::AnalysisOptions;
use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Alyze
///
/// Every section is optional; missing keys take the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub cache: CacheConfig,
    /// Options applied when a request does not override them
    pub defaults: AnalysisOptions,
}

/// Network fetch configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Hard limit for the whole fetch, redirects and body included (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Limit for establishing a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirect hops when redirects are followed
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_redirects: 10,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// Result cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long an entry is served from the cache (seconds)
    #[serde(rename = "freshness-secs")]
    pub freshness_secs: u64,

    /// Entry count above which the oldest entries are evicted on write
    #[serde(rename = "max-entries")]
    pub max_entries: usize,

    /// Number of oldest entries removed by one eviction
    #[serde(rename = "eviction-batch")]
    pub eviction_batch: usize,

    /// Period of the background sweep (seconds)
    #[serde(rename = "sweep-interval-secs")]
    pub sweep_interval_secs: u64,

    /// Age above which the sweep removes an entry (seconds)
    #[serde(rename = "max-age-secs")]
    pub max_age_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_secs: 300,
            max_entries: 200,
            eviction_batch: 50,
            sweep_interval_secs: 3600,
            max_age_secs: 3600,
        }
    }
}

impl CacheConfig {
    pub fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}
