//! Application-level errors

use std::{path::PathBuf, time::Duration};

use domain::{DomainError, EpisodeKey};
use thiserror::Error;

/// Pipeline stage a failed episode request broke in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureStage {
    /// Raw data could not be loaded or analysed
    Compute,
    /// A persisted artifact exists but could not be read back
    Deserialize,
    /// A computed artifact could not be written to disk
    Persist,
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Key absent from a cache tier
    #[error("No cached artifact for {key}")]
    NotFound { key: EpisodeKey },

    /// Persisted artifact missing or corrupt
    #[error("Cannot deserialize artifact at {}: {reason}", path.display())]
    Deserialization { path: PathBuf, reason: String },

    /// Scenario metadata missing or unparsable
    #[error("Malformed scenario metadata at {}: {reason}", path.display())]
    MalformedMetadata { path: PathBuf, reason: String },

    /// Raw episode folder does not exist
    #[error("No raw data for {key} at {}", path.display())]
    RawDataMissing { key: EpisodeKey, path: PathBuf },

    /// Analytics computation failed
    #[error("Analytics computation failed for {key}: {reason}")]
    Compute { key: EpisodeKey, reason: String },

    /// Analytics computation did not finish in time
    #[error("Analytics computation for {key} timed out after {timeout:?}")]
    ComputeTimeout { key: EpisodeKey, timeout: Duration },

    /// Artifact could not be written to the persisted tier
    #[error("Cannot persist artifact at {}: {reason}", path.display())]
    Persist { path: PathBuf, reason: String },

    /// Cache root still holds entries
    #[error("Cache directory {} is not empty", path.display())]
    NotEmpty { path: PathBuf },

    /// Filesystem error outside the cases above
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this is a plain tier miss, recoverable by asking the next tier
    pub const fn is_tier_miss(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Which stage of an episode request failed, if it is a pipeline error
    pub const fn stage(&self) -> Option<FailureStage> {
        match self {
            Self::RawDataMissing { .. } | Self::Compute { .. } | Self::ComputeTimeout { .. } => {
                Some(FailureStage::Compute)
            },
            Self::Deserialization { .. } => Some(FailureStage::Deserialize),
            Self::Persist { .. } => Some(FailureStage::Persist),
            _ => None,
        }
    }
}
