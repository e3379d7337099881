//! Analytics computation ports
//!
//! The compute gateway turns an (agent, episode) into an artifact. The
//! default gateway is composed from a raw-episode source and an analytics
//! builder, both of which live outside this crate.

use async_trait::async_trait;
use domain::{AnalyticsArtifact, EpisodeKey, RawEpisode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for computing an artifact from raw simulation output
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnalyticsComputePort: Send + Sync {
    /// Compute the artifact for `key`
    ///
    /// Fails with [`ApplicationError::RawDataMissing`] when the raw episode
    /// folder does not exist; builder failures are passed through.
    async fn compute(&self, key: &EpisodeKey) -> Result<AnalyticsArtifact, ApplicationError>;
}

/// Port for loading the raw records of one episode
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RawEpisodeSource: Send + Sync {
    /// Load the raw episode for `key`
    async fn load_raw_episode(&self, key: &EpisodeKey) -> Result<RawEpisode, ApplicationError>;
}

/// Port for the (possibly expensive, blocking) analytics builder
#[cfg_attr(test, automock)]
pub trait AnalyticsBuilderPort: Send + Sync {
    /// Build the analytics artifact of a raw episode
    fn build(&self, raw: &RawEpisode) -> Result<AnalyticsArtifact, ApplicationError>;
}
