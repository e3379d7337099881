//! Cache implementations
//!
//! Provides the two artifact tiers used by the episode service:
//! - `MokaArtifactCache`: bounded in-memory tier with optional TTL/TTI
//! - `FsArtifactStore`: one JSON file per artifact under the cache root

mod fs_artifact_store;
mod moka_cache;

pub use fs_artifact_store::{ARTIFACT_EXTENSION, FsArtifactStore};
pub use moka_cache::{MokaArtifactCache, MokaCacheConfig};
