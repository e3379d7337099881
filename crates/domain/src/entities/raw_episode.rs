//! Raw episode - what the simulator left on disk for one run

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ScenarioMeta;
use crate::value_objects::EpisodeKey;

/// One file of recorded episode data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEpisodeFile {
    /// File name relative to the episode folder
    pub name: String,
    /// Size on disk
    pub size_bytes: u64,
}

/// Raw records of one (agent, episode), ready for the analytics builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEpisode {
    /// Which run this is
    pub key: EpisodeKey,
    /// Folder the records were loaded from
    pub directory: PathBuf,
    /// Parsed `episode_meta.json`
    pub meta: ScenarioMeta,
    /// Record files found in the folder, sorted by name
    pub files: Vec<RawEpisodeFile>,
}

impl RawEpisode {
    /// Total size of all record files
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_bytes_sums_files() {
        let raw = RawEpisode {
            key: EpisodeKey::parse("a", "e").unwrap(),
            directory: PathBuf::from("/tmp/a/e"),
            meta: ScenarioMeta::new(1, 0.0),
            files: vec![
                RawEpisodeFile {
                    name: "actions.npz".to_string(),
                    size_bytes: 100,
                },
                RawEpisodeFile {
                    name: "observations.npz".to_string(),
                    size_bytes: 23,
                },
            ],
        };
        assert_eq!(raw.total_bytes(), 123);
    }
}
