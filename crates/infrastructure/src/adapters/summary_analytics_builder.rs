//! Default analytics builder
//!
//! Summarises what the raw-episode loader found: survival, reward and the
//! recorded files. Hosts with a richer analytics engine plug their own
//! `AnalyticsBuilderPort` into `initialize_with`.

use application::{error::ApplicationError, ports::AnalyticsBuilderPort};
use domain::{AnalyticsArtifact, RawEpisode};
use serde_json::json;

/// Builds a summary artifact from episode metadata and file listing
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryAnalyticsBuilder;

impl AnalyticsBuilderPort for SummaryAnalyticsBuilder {
    fn build(&self, raw: &RawEpisode) -> Result<AnalyticsArtifact, ApplicationError> {
        let steps = raw.meta.nb_timestep_played;
        #[allow(clippy::cast_precision_loss)]
        let mean_reward = if steps > 0 {
            Some(raw.meta.cumulative_reward / steps as f64)
        } else {
            None
        };

        let payload = json!({
            "nb_timestep_played": steps,
            "cumulative_reward": raw.meta.cumulative_reward,
            "mean_reward_per_step": mean_reward,
            "record_files": raw.files,
            "record_bytes": raw.total_bytes(),
            "meta": raw.meta.extra,
        });

        Ok(AnalyticsArtifact::new(&raw.key, payload))
    }
}
