//! Application configuration
//!
//! Split into focused sub-modules:
//! - `paths`: results tree, cache root and environment configuration folder
//! - `cache`: in-memory tier bounds and the compute timeout
//!
//! Sources, later ones overriding earlier ones: built-in defaults, an
//! optional `config.toml` (or an explicit file), then `GRIDSCOPE__*`
//! environment variables such as `GRIDSCOPE__PATHS__RESULTS_ROOT`.

mod cache;
mod paths;

use std::path::Path;

use application::services::ScanPolicy;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use cache::CacheConfig;
pub use paths::{DEFAULT_CACHE_DIR, PathsConfig, ROOT_ENV_VAR, ResolvedPaths, default_base_dir};

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "GRIDSCOPE";

/// Results tree scan settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// What to do with a scenario whose metadata cannot be read
    #[serde(default)]
    pub policy: ScanPolicy,
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load configuration from an explicit file and environment
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    /// Parse a TOML document without consulting the environment
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: Self = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., GRIDSCOPE__CACHE__MEMORY_MAX_ENTRIES)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?
            .validated()?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    fn validated(self) -> Result<Self, config::ConfigError> {
        // Write-through needs room for at least one artifact in memory
        if self.cache.memory_max_entries == 0 {
            return Err(config::ConfigError::Message(
                "cache.memory_max_entries must be at least 1".into(),
            ));
        }
        Ok(self)
    }

    /// Concrete paths, with unset entries derived from the base directory
    #[must_use]
    pub fn resolved_paths(&self) -> ResolvedPaths {
        self.paths.resolve(&default_base_dir())
    }
}
