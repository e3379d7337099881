//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the moka in-memory
//! tier, the filesystem tier, the results tree walker and the default
//! compute gateway. Also owns configuration, telemetry and the explicit
//! startup routine.

pub mod adapters;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::{initialize, initialize_with};
pub use cache::{FsArtifactStore, MokaArtifactCache, MokaCacheConfig};
pub use config::{AppConfig, CacheConfig, PathsConfig, ResolvedPaths, ScanConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
