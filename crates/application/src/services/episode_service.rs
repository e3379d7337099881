//! Episode service - two-tier cache-and-compute orchestration
//!
//! Lookup order for an (agent, episode):
//! 1. in-memory tier
//! 2. persisted tier, promoting the artifact into memory
//! 3. compute gateway, writing through to disk and then memory
//!
//! The whole sequence runs under a per-key async mutex so concurrent
//! requests for one episode trigger at most one computation. Failed
//! computations leave both tiers untouched.

use std::{
    collections::HashMap,
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use domain::{AnalyticsArtifact, EpisodeKey};
use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{AnalyticsComputePort, ArtifactDiskStore, ArtifactMemoryStore, CacheStats},
};

type KeySlot = Arc<AsyncMutex<()>>;

/// Service returning analytics artifacts, computing them at most once
pub struct EpisodeService {
    memory: Arc<dyn ArtifactMemoryStore>,
    disk: Arc<dyn ArtifactDiskStore>,
    compute: Arc<dyn AnalyticsComputePort>,
    compute_timeout: Option<Duration>,
    in_flight: Mutex<HashMap<EpisodeKey, KeySlot>>,
}

impl fmt::Debug for EpisodeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EpisodeService")
            .field("compute_timeout", &self.compute_timeout)
            .field("in_flight", &self.in_flight.lock().len())
            .finish_non_exhaustive()
    }
}

impl EpisodeService {
    /// Create a new episode service with unbounded computation time
    pub fn new(
        memory: Arc<dyn ArtifactMemoryStore>,
        disk: Arc<dyn ArtifactDiskStore>,
        compute: Arc<dyn AnalyticsComputePort>,
    ) -> Self {
        Self {
            memory,
            disk,
            compute,
            compute_timeout: None,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Bound each computation; `None` waits indefinitely
    #[must_use]
    pub const fn with_compute_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.compute_timeout = timeout;
        self
    }

    /// Get the artifact for raw agent/episode names
    pub async fn get_episode(
        &self,
        agent: &str,
        episode: &str,
    ) -> Result<Arc<AnalyticsArtifact>, ApplicationError> {
        let key = EpisodeKey::parse(agent, episode)?;
        self.get(&key).await
    }

    /// Get the artifact for `key`, populating both tiers on a miss
    #[instrument(skip(self), fields(key = %key))]
    pub async fn get(&self, key: &EpisodeKey) -> Result<Arc<AnalyticsArtifact>, ApplicationError> {
        if let Some(artifact) = self.memory_hit(key).await? {
            debug!(tier = "memory", "Cache hit");
            return Ok(artifact);
        }

        // Released on drop, so cancelled requests do not leak their slot
        let slot = SlotGuard::acquire(self, key);
        let _lock = slot.slot.lock().await;
        self.load_or_compute(key).await
    }

    /// In-memory tier statistics
    pub fn memory_stats(&self) -> CacheStats {
        self.memory.stats()
    }

    /// Remove the persisted tier's root directory (must be empty)
    pub async fn clear_persisted(&self) -> Result<(), ApplicationError> {
        self.disk.clear().await
    }

    async fn memory_hit(
        &self,
        key: &EpisodeKey,
    ) -> Result<Option<Arc<AnalyticsArtifact>>, ApplicationError> {
        if !self.memory.contains(key).await {
            return Ok(None);
        }
        match self.memory.get(key).await {
            Ok(artifact) => Ok(Some(artifact)),
            // Evicted between the two calls
            Err(e) if e.is_tier_miss() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn load_or_compute(
        &self,
        key: &EpisodeKey,
    ) -> Result<Arc<AnalyticsArtifact>, ApplicationError> {
        // Another request for this key may have finished while we waited.
        // The miss was already counted before the lock.
        if let Some(artifact) = self.memory.peek(key).await {
            debug!(tier = "memory", "Cache hit after waiting for in-flight request");
            return Ok(artifact);
        }

        if self.disk.exists(key).await? {
            let start = Instant::now();
            let artifact = Arc::new(self.disk.read(key).await?);
            debug!(
                tier = "disk",
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Cache hit, promoting to memory"
            );
            self.memory.put(key.clone(), Arc::clone(&artifact)).await;
            return Ok(artifact);
        }

        debug!("Cache miss (all tiers)");
        let start = Instant::now();
        let artifact = self.compute_bounded(key).await?;
        self.disk.write(key, &artifact).await?;

        let artifact = Arc::new(artifact);
        self.memory.put(key.clone(), Arc::clone(&artifact)).await;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Computed and cached episode analytics"
        );
        Ok(artifact)
    }

    async fn compute_bounded(&self, key: &EpisodeKey) -> Result<AnalyticsArtifact, ApplicationError> {
        match self.compute_timeout {
            Some(limit) => tokio::time::timeout(limit, self.compute.compute(key))
                .await
                .map_err(|_| ApplicationError::ComputeTimeout {
                    key: key.clone(),
                    timeout: limit,
                })?,
            None => self.compute.compute(key).await,
        }
    }

    fn release_slot(&self, key: &EpisodeKey, slot: &KeySlot) {
        let mut in_flight = self.in_flight.lock();
        // Map entry plus our handle: nobody else is waiting on this key
        let idle = in_flight
            .get(key)
            .is_some_and(|current| Arc::ptr_eq(current, slot) && Arc::strong_count(slot) == 2);
        if idle {
            in_flight.remove(key);
        }
    }
}

/// Handle on a key's in-flight slot, given back to the map when dropped
struct SlotGuard<'a> {
    service: &'a EpisodeService,
    key: &'a EpisodeKey,
    slot: KeySlot,
}

impl<'a> SlotGuard<'a> {
    fn acquire(service: &'a EpisodeService, key: &'a EpisodeKey) -> Self {
        let slot = Arc::clone(service.in_flight.lock().entry(key.clone()).or_default());
        Self { service, key, slot }
    }
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.service.release_slot(self.key, &self.slot);
    }
}
