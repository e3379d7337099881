//! Per-scenario metadata written by the simulator next to each run

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contents of one `episode_meta.json`
///
/// Only the two fields the leaderboard needs are typed; everything else
/// the simulator wrote is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMeta {
    /// Number of time steps the agent survived
    pub nb_timestep_played: i64,
    /// Sum of rewards over the played time steps
    pub cumulative_reward: f64,
    /// Remaining raw metadata fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScenarioMeta {
    /// File name of the metadata file inside a scenario folder
    pub const FILE_NAME: &'static str = "episode_meta.json";

    /// Create metadata with no extra fields
    pub fn new(nb_timestep_played: i64, cumulative_reward: f64) -> Self {
        Self {
            nb_timestep_played,
            cumulative_reward,
            extra: Map::new(),
        }
    }

    /// Parse the JSON document of a metadata file
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
