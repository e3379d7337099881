//! Analytics artifact - the computed, cacheable view of one episode

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value_objects::{AgentName, EpisodeKey, EpisodeName};

/// Result of running the analytics builder on one (agent, episode)
///
/// Immutable once produced. The payload is opaque to this crate; only the
/// builder and the dashboard know its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsArtifact {
    /// Agent that produced the episode
    pub agent: AgentName,
    /// Episode the analytics describe
    pub episode: EpisodeName,
    /// When the analytics were computed
    pub computed_at: DateTime<Utc>,
    /// Builder-defined analytics content
    pub payload: Value,
}

impl AnalyticsArtifact {
    /// Create an artifact for `key`, stamped with the current time
    pub fn new(key: &EpisodeKey, payload: Value) -> Self {
        Self {
            agent: key.agent().clone(),
            episode: key.episode().clone(),
            computed_at: Utc::now(),
            payload,
        }
    }

    /// Override the computation timestamp
    #[must_use]
    pub const fn with_computed_at(mut self, computed_at: DateTime<Utc>) -> Self {
        self.computed_at = computed_at;
        self
    }

    /// Cache key this artifact belongs to
    pub fn key(&self) -> EpisodeKey {
        EpisodeKey::new(self.agent.clone(), self.episode.clone())
    }
}
