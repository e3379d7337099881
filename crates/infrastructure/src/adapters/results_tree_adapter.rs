//! Filesystem walker for the results tree
//!
//! Layout: `<results_root>/<agent>/<scenario>/episode_meta.json`.

use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::ResultsTreePort};
use async_trait::async_trait;
use domain::{AgentName, EpisodeName, ScenarioMeta};
use tracing::{debug, instrument, warn};

/// Reads agents, scenarios and scenario metadata from disk
#[derive(Debug, Clone)]
pub struct FsResultsTree {
    root: PathBuf,
}

impl FsResultsTree {
    /// Create a walker over `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Results root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Names of the sub-directories of `dir`, sorted
///
/// Symlinks are followed. Entries whose name is not UTF-8 are skipped.
async fn sorted_subdirectories(dir: &Path) -> Result<Vec<String>, ApplicationError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ApplicationError::io(dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ApplicationError::io(dir, e))?
    {
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        if !is_dir {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => warn!(name = ?raw, dir = %dir.display(), "Skipping non UTF-8 directory"),
        }
    }

    names.sort();
    Ok(names)
}

#[async_trait]
impl ResultsTreePort for FsResultsTree {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn list_agents(&self) -> Result<Vec<AgentName>, ApplicationError> {
        let agents: Vec<AgentName> = sorted_subdirectories(&self.root)
            .await?
            .into_iter()
            .filter_map(|name| match AgentName::new(name) {
                Ok(agent) if agent.is_reserved() => {
                    debug!(agent = %agent, "Skipping reserved directory");
                    None
                },
                Ok(agent) => Some(agent),
                Err(e) => {
                    warn!(error = %e, "Skipping agent directory");
                    None
                },
            })
            .collect();

        debug!(count = agents.len(), "Agents discovered");
        Ok(agents)
    }

    #[instrument(skip(self), fields(agent = %agent))]
    async fn list_scenarios(
        &self,
        agent: &AgentName,
    ) -> Result<Vec<EpisodeName>, ApplicationError> {
        let scenarios = sorted_subdirectories(&self.root.join(agent.as_str()))
            .await?
            .into_iter()
            .filter_map(|name| {
                EpisodeName::new(name)
                    .inspect_err(|e| warn!(error = %e, "Skipping scenario directory"))
                    .ok()
            })
            .collect();
        Ok(scenarios)
    }

    #[instrument(skip(self), fields(agent = %agent, scenario = %scenario), level = "debug")]
    async fn read_scenario_meta(
        &self,
        agent: &AgentName,
        scenario: &EpisodeName,
    ) -> Result<ScenarioMeta, ApplicationError> {
        let path = self
            .root
            .join(agent.as_str())
            .join(scenario.as_str())
            .join(ScenarioMeta::FILE_NAME);

        let bytes =
            tokio::fs::read(&path)
                .await
                .map_err(|e| ApplicationError::MalformedMetadata {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

        ScenarioMeta::from_json_slice(&bytes).map_err(|e| ApplicationError::MalformedMetadata {
            path,
            reason: e.to_string(),
        })
    }
}
