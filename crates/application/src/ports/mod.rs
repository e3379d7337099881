//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod analytics_port;
mod artifact_cache_port;
mod results_tree_port;

#[cfg(test)]
pub use analytics_port::{MockAnalyticsBuilderPort, MockAnalyticsComputePort, MockRawEpisodeSource};
pub use analytics_port::{AnalyticsBuilderPort, AnalyticsComputePort, RawEpisodeSource};
#[cfg(test)]
pub use artifact_cache_port::{MockArtifactDiskStore, MockArtifactMemoryStore};
pub use artifact_cache_port::{ArtifactDiskStore, ArtifactMemoryStore, CacheStats};
#[cfg(test)]
pub use results_tree_port::MockResultsTreePort;
pub use results_tree_port::ResultsTreePort;
