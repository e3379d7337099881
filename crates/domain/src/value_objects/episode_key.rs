//! Cache key for one (agent, episode) pair
//!
//! The key is a structured record, so two different pairs can never map
//! to the same key. ("a", "bc") and ("ab", "c") stay distinct:
//!
//! ```
//! use domain::{AgentName, EpisodeKey, EpisodeName};
//!
//! let left = EpisodeKey::new(AgentName::new("a").unwrap(), EpisodeName::new("bc").unwrap());
//! let right = EpisodeKey::new(AgentName::new("ab").unwrap(), EpisodeName::new("c").unwrap());
//! assert_ne!(left, right);
//! assert_ne!(left.encoded(), right.encoded());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AgentName, EpisodeName};
use crate::errors::DomainError;

const SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// Identifies one analytics artifact in every cache tier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpisodeKey {
    agent: AgentName,
    episode: EpisodeName,
}

impl EpisodeKey {
    /// Derive the key for an (agent, episode) pair
    pub const fn new(agent: AgentName, episode: EpisodeName) -> Self {
        Self { agent, episode }
    }

    /// Validate raw strings and derive the key
    pub fn parse(agent: &str, episode: &str) -> Result<Self, DomainError> {
        Ok(Self::new(AgentName::new(agent)?, EpisodeName::new(episode)?))
    }

    /// The agent half of the key
    pub const fn agent(&self) -> &AgentName {
        &self.agent
    }

    /// The episode half of the key
    pub const fn episode(&self) -> &EpisodeName {
        &self.episode
    }

    /// Injective textual form: each component escaped, then joined by `|`
    pub fn encoded(&self) -> String {
        let mut out = String::with_capacity(self.agent.as_str().len() + self.episode.as_str().len() + 1);
        push_escaped(&mut out, self.agent.as_str());
        out.push(SEPARATOR);
        push_escaped(&mut out, self.episode.as_str());
        out
    }
}

fn push_escaped(out: &mut String, component: &str) {
    for c in component.chars() {
        if c == SEPARATOR || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(agent: &str, episode: &str) -> EpisodeKey {
        EpisodeKey::parse(agent, episode).unwrap()
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(key("agent", "000"), key("agent", "000"));
        assert_eq!(key("agent", "000").encoded(), key("agent", "000").encoded());
    }

    #[test]
    fn shared_prefix_pairs_do_not_collide() {
        assert_ne!(key("a", "bc"), key("ab", "c"));
        assert_ne!(key("a", "bc").encoded(), key("ab", "c").encoded());
    }

    #[test]
    fn separator_inside_names_is_escaped() {
        assert_ne!(key("a|b", "c").encoded(), key("a", "b|c").encoded());
        assert_eq!(key("a|b", "c").encoded(), "a\\|b|c");
    }

    #[test]
    fn escape_inside_names_is_escaped() {
        // Backslashes never reach here as path components, but the encoding
        // still has to be unambiguous for the characters it reserves.
        let mut out = String::new();
        push_escaped(&mut out, "x\\");
        assert_eq!(out, "x\\\\");
    }

    #[test]
    fn parse_rejects_invalid_components() {
        assert!(EpisodeKey::parse("", "000").is_err());
        assert!(EpisodeKey::parse("agent", "a/b").is_err());
    }

    #[test]
    fn accessors_return_components() {
        let k = key("greedy", "jan28");
        assert_eq!(k.agent().as_str(), "greedy");
        assert_eq!(k.episode().as_str(), "jan28");
        assert_eq!(k.to_string(), "greedy|jan28");
    }
}
