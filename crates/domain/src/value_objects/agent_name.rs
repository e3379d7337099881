//! Agent name value object
//!
//! # Examples
//!
//! ```
//! use domain::AgentName;
//!
//! let agent = AgentName::new("do_nothing").unwrap();
//! assert_eq!(agent.as_str(), "do_nothing");
//!
//! // Agent names become directory names, so separators are refused
//! assert!(AgentName::new("../etc").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::path_component;
use crate::errors::DomainError;

/// Name of the agent whose policy produced a set of episodes
///
/// Also the name of the agent's folder under the results root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentName(String);

impl AgentName {
    /// Create a validated agent name
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        path_component::validate("agent", name.into()).map(Self)
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the folder is reserved for internal use (`_cache` and friends)
    pub fn is_reserved(&self) -> bool {
        self.0.starts_with('_')
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AgentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AgentName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for AgentName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentName> for String {
    fn from(value: AgentName) -> Self {
        value.0
    }
}
