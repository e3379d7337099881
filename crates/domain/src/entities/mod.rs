//! Domain entities - Objects with identity and lifecycle

mod analytics_artifact;
mod leaderboard;
mod network_layout;
mod raw_episode;
mod scenario_index;
mod scenario_meta;

pub use analytics_artifact::AnalyticsArtifact;
pub use leaderboard::{Leaderboard, LeaderboardEntry, NO_RUN_VALUE};
pub use network_layout::{NetworkLayout, SubstationCoord};
pub use raw_episode::{RawEpisode, RawEpisodeFile};
pub use scenario_index::ScenarioIndex;
pub use scenario_meta::ScenarioMeta;
