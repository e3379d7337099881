//! Results tree port - read-only view of `<results_root>/<agent>/<scenario>/`

use async_trait::async_trait;
use domain::{AgentName, EpisodeName, ScenarioMeta};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for walking simulator output
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultsTreePort: Send + Sync {
    /// Agent folders under the results root, sorted, reserved folders excluded
    async fn list_agents(&self) -> Result<Vec<AgentName>, ApplicationError>;

    /// Scenario folders of one agent, sorted; plain files are skipped
    async fn list_scenarios(&self, agent: &AgentName)
    -> Result<Vec<EpisodeName>, ApplicationError>;

    /// Read `episode_meta.json` of one scenario
    ///
    /// Fails with [`ApplicationError::MalformedMetadata`] when the file is
    /// missing or unparsable.
    async fn read_scenario_meta(
        &self,
        agent: &AgentName,
        scenario: &EpisodeName,
    ) -> Result<ScenarioMeta, ApplicationError>;
}
