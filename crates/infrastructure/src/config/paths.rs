//! Filesystem locations of the results tree, cache and layout

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable naming the base directory for path defaults
pub const ROOT_ENV_VAR: &str = "GRIDSCOPE_ROOT";

/// Directory of the persisted cache tier, relative to the results root
pub const DEFAULT_CACHE_DIR: &str = "_cache";

/// Path settings; unset entries derive from the base directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Folder holding one sub-directory per agent (default: `<root>/data/agents`)
    #[serde(default)]
    pub results_root: Option<PathBuf>,

    /// Persisted cache tier (default: `<results_root>/_cache`)
    #[serde(default)]
    pub cache_root: Option<PathBuf>,

    /// Environment configuration with `coords.csv` (default: `<root>/data/env_conf`)
    #[serde(default)]
    pub env_conf_folder: Option<PathBuf>,
}

/// Concrete paths after defaults are applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPaths {
    pub results_root: PathBuf,
    pub cache_root: PathBuf,
    pub env_conf_folder: PathBuf,
}

impl PathsConfig {
    /// Fill unset paths relative to `base`
    #[must_use]
    pub fn resolve(&self, base: &Path) -> ResolvedPaths {
        let data = base.join("data");
        let results_root = self
            .results_root
            .clone()
            .unwrap_or_else(|| data.join("agents"));
        let cache_root = self
            .cache_root
            .clone()
            .unwrap_or_else(|| results_root.join(DEFAULT_CACHE_DIR));
        let env_conf_folder = self
            .env_conf_folder
            .clone()
            .unwrap_or_else(|| data.join("env_conf"));

        ResolvedPaths {
            results_root,
            cache_root,
            env_conf_folder,
        }
    }
}

/// Base directory for defaults: `$GRIDSCOPE_ROOT`, else the working directory
pub fn default_base_dir() -> PathBuf {
    std::env::var_os(ROOT_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
