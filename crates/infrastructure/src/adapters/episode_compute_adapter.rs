//! Compute gateway composed from a raw-episode source and a builder

use std::{sync::Arc, time::Instant};

use application::{
    error::ApplicationError,
    ports::{AnalyticsBuilderPort, AnalyticsComputePort, RawEpisodeSource},
};
use async_trait::async_trait;
use domain::{AnalyticsArtifact, EpisodeKey};
use tracing::{info, instrument};

/// Loads the raw episode, then runs the builder on the blocking pool
pub struct EpisodeComputeAdapter {
    source: Arc<dyn RawEpisodeSource>,
    builder: Arc<dyn AnalyticsBuilderPort>,
}

impl std::fmt::Debug for EpisodeComputeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpisodeComputeAdapter").finish_non_exhaustive()
    }
}

impl EpisodeComputeAdapter {
    pub fn new(source: Arc<dyn RawEpisodeSource>, builder: Arc<dyn AnalyticsBuilderPort>) -> Self {
        Self { source, builder }
    }
}

#[async_trait]
impl AnalyticsComputePort for EpisodeComputeAdapter {
    #[instrument(skip(self), fields(key = %key))]
    async fn compute(&self, key: &EpisodeKey) -> Result<AnalyticsArtifact, ApplicationError> {
        let started = Instant::now();
        let raw = self.source.load_raw_episode(key).await?;

        let builder = Arc::clone(&self.builder);
        let artifact = tokio::task::spawn_blocking(move || builder.build(&raw))
            .await
            .map_err(|e| ApplicationError::Compute {
                key: key.clone(),
                reason: format!("builder task failed: {e}"),
            })??;

        if artifact.key() != *key {
            return Err(ApplicationError::Compute {
                key: key.clone(),
                reason: format!("builder returned an artifact for {}", artifact.key()),
            });
        }

        info!(
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Episode analytics computed"
        );
        Ok(artifact)
    }
}
