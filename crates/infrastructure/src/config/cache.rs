//! Cache tier and compute settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::MokaCacheConfig;

/// Settings for the in-memory tier and the compute bound
///
/// Durations of `0` mean "disabled".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum artifacts held in memory (default: 256, at least 1)
    #[serde(default = "default_memory_max_entries")]
    pub memory_max_entries: u64,

    /// Evict in-memory artifacts this long after insertion
    #[serde(default)]
    pub time_to_live_secs: u64,

    /// Evict in-memory artifacts not read for this long
    #[serde(default)]
    pub time_to_idle_secs: u64,

    /// Give up on an analytics computation after this long (default: 10 minutes)
    #[serde(default = "default_compute_timeout")]
    pub compute_timeout_secs: u64,
}

const fn default_memory_max_entries() -> u64 {
    256
}

const fn default_compute_timeout() -> u64 {
    10 * 60 // 10 minutes
}

const fn non_zero_secs(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_max_entries: default_memory_max_entries(),
            time_to_live_secs: 0,
            time_to_idle_secs: 0,
            compute_timeout_secs: default_compute_timeout(),
        }
    }
}

impl CacheConfig {
    /// Compute bound, if any
    #[must_use]
    pub const fn compute_timeout(&self) -> Option<Duration> {
        non_zero_secs(self.compute_timeout_secs)
    }

    /// Settings for the moka tier
    #[must_use]
    pub const fn moka_config(&self) -> MokaCacheConfig {
        MokaCacheConfig {
            max_entries: if self.memory_max_entries == 0 {
                1
            } else {
                self.memory_max_entries
            },
            time_to_live: non_zero_secs(self.time_to_live_secs),
            time_to_idle: non_zero_secs(self.time_to_idle_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.memory_max_entries, 256);
        assert_eq!(config.compute_timeout(), Some(Duration::from_secs(600)));

        let moka = config.moka_config();
        assert!(moka.time_to_live.is_none());
        assert!(moka.time_to_idle.is_none());
    }

    #[test]
    fn zero_timeout_disables_bound() {
        let config = CacheConfig {
            compute_timeout_secs: 0,
            ..CacheConfig::default()
        };
        assert!(config.compute_timeout().is_none());
    }

    #[test]
    fn moka_config_carries_ttl_and_tti() {
        let config = CacheConfig {
            memory_max_entries: 8,
            time_to_live_secs: 60,
            time_to_idle_secs: 30,
            ..CacheConfig::default()
        };

        let moka = config.moka_config();
        assert_eq!(moka.max_entries, 8);
        assert_eq!(moka.time_to_live, Some(Duration::from_secs(60)));
        assert_eq!(moka.time_to_idle, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let config = CacheConfig {
            memory_max_entries: 0,
            ..CacheConfig::default()
        };
        assert_eq!(config.moka_config().max_entries, 1);
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: CacheConfig = serde_json::from_str(r#"{"memory_max_entries": 4}"#).unwrap();
        assert_eq!(config.memory_max_entries, 4);
        assert_eq!(config.compute_timeout_secs, 600);
    }
}
