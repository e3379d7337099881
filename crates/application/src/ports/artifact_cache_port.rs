//! Cache tier ports
//!
//! Two tiers hold analytics artifacts: a volatile in-memory tier checked
//! first, and a persisted filesystem tier that survives restarts.
//! Both are keyed by the structured [`EpisodeKey`].

use std::sync::Arc;

use async_trait::async_trait;
use domain::{AnalyticsArtifact, EpisodeKey};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// In-memory tier
///
/// Implementations must be safe for concurrent readers and writers and
/// should bound their size.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactMemoryStore: Send + Sync {
    /// Whether an artifact is held for `key`
    async fn contains(&self, key: &EpisodeKey) -> bool;

    /// Get the artifact for `key`
    ///
    /// Fails with [`ApplicationError::NotFound`] when absent.
    async fn get(&self, key: &EpisodeKey) -> Result<Arc<AnalyticsArtifact>, ApplicationError>;

    /// Look up `key` without touching the hit/miss counters
    async fn peek(&self, key: &EpisodeKey) -> Option<Arc<AnalyticsArtifact>>;

    /// Store an artifact, silently replacing any previous one
    async fn put(&self, key: EpisodeKey, artifact: Arc<AnalyticsArtifact>);

    /// Hit/miss/entry counters
    fn stats(&self) -> CacheStats;
}

/// Persisted tier
///
/// The presence of an entry is the only existence test; entries are never
/// revalidated against newer raw data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArtifactDiskStore: Send + Sync {
    /// Whether a persisted artifact exists for `key`
    async fn exists(&self, key: &EpisodeKey) -> Result<bool, ApplicationError>;

    /// Read the persisted artifact
    ///
    /// Fails with [`ApplicationError::Deserialization`] when the entry is
    /// missing or corrupt.
    async fn read(&self, key: &EpisodeKey) -> Result<AnalyticsArtifact, ApplicationError>;

    /// Persist an artifact so readers never observe a partial write
    async fn write(
        &self,
        key: &EpisodeKey,
        artifact: &AnalyticsArtifact,
    ) -> Result<(), ApplicationError>;

    /// Remove the cache root; refuses with [`ApplicationError::NotEmpty`]
    /// when anything is stored beneath it
    async fn clear(&self) -> Result<(), ApplicationError>;
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate as a fraction (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            // Precision loss is acceptable for statistics display
            self.hits as f64 / total as f64
        }
    }
}
