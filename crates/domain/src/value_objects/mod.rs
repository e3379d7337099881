//! Value Objects - Immutable, identity-less domain primitives

mod agent_name;
mod episode_key;
mod episode_name;
mod path_component;

pub use agent_name::AgentName;
pub use episode_key::EpisodeKey;
pub use episode_name::EpisodeName;
