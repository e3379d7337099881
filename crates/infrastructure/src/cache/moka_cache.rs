//! Moka in-memory cache implementation
//!
//! Thread-safe, bounded in-memory tier. Entries are evicted when the entry
//! limit is reached and, optionally, after a time-to-live or time-to-idle.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use application::{
    error::ApplicationError,
    ports::{ArtifactMemoryStore, CacheStats},
};
use async_trait::async_trait;
use domain::{AnalyticsArtifact, EpisodeKey};
use moka::future::Cache;
use tracing::{debug, instrument};

/// Artifacts can be large; keep only a few hundred episodes resident
const DEFAULT_MAX_ENTRIES: u64 = 256;

/// Configuration for the Moka cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MokaCacheConfig {
    /// Maximum number of artifacts held
    pub max_entries: u64,
    /// Evict entries this long after insertion
    pub time_to_live: Option<Duration>,
    /// Evict entries not read for this long
    pub time_to_idle: Option<Duration>,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            time_to_live: None,
            time_to_idle: None,
        }
    }
}

/// Moka-based in-memory artifact tier
///
/// A negative `contains` counts as a miss, a successful `get` as a hit.
pub struct MokaArtifactCache {
    cache: Cache<EpisodeKey, Arc<AnalyticsArtifact>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaArtifactCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaArtifactCache")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaArtifactCache {
    /// Create a new Moka cache with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MokaCacheConfig::default())
    }

    /// Create a new Moka cache with custom configuration
    #[must_use]
    pub fn with_config(config: MokaCacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_entries);

        if let Some(ttl) = config.time_to_live {
            builder = builder.time_to_live(ttl);
        }
        if let Some(tti) = config.time_to_idle {
            builder = builder.time_to_idle(tti);
        }

        Self {
            cache: builder.build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Apply pending evictions so `entry_count` is exact
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl Default for MokaArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactMemoryStore for MokaArtifactCache {
    #[instrument(skip(self), fields(key = %key), level = "debug")]
    async fn contains(&self, key: &EpisodeKey) -> bool {
        let present = self.cache.contains_key(key);
        if !present {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        present
    }

    #[instrument(skip(self), fields(key = %key), level = "debug")]
    async fn get(&self, key: &EpisodeKey) -> Result<Arc<AnalyticsArtifact>, ApplicationError> {
        if let Some(artifact) = self.cache.get(key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Cache hit");
            Ok(artifact)
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!("Cache miss");
            Err(ApplicationError::NotFound { key: key.clone() })
        }
    }

    async fn peek(&self, key: &EpisodeKey) -> Option<Arc<AnalyticsArtifact>> {
        self.cache.get(key).await
    }

    #[instrument(skip(self, artifact), fields(key = %key), level = "debug")]
    async fn put(&self, key: EpisodeKey, artifact: Arc<AnalyticsArtifact>) {
        self.cache.insert(key, artifact).await;
        debug!("Cache set");
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}
