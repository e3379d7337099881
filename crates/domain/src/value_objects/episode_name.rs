//! Episode (scenario) name value object

use std::fmt;

use serde::{Deserialize, Serialize};

use super::path_component;
use crate::errors::DomainError;

/// Name of one recorded simulation run
///
/// "Episode" and "scenario" name the same thing: the folder holding one
/// run under an agent's results directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EpisodeName(String);

impl EpisodeName {
    /// Create a validated episode name
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        path_component::validate("episode", name.into()).map(Self)
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EpisodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EpisodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EpisodeName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for EpisodeName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EpisodeName> for String {
    fn from(value: EpisodeName) -> Self {
        value.0
    }
}
