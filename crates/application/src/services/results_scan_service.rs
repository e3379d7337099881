//! Results scan service - one-shot reduction over the results tree
//!
//! Walks `<results_root>/<agent>/<scenario>/episode_meta.json` for every
//! agent in the order given and builds the per-scenario metadata map, the
//! leaderboard and the agent/scenario index.

use std::{collections::BTreeMap, fmt, sync::Arc, time::Instant};

use domain::{AgentName, EpisodeName, Leaderboard, ScenarioIndex, ScenarioMeta};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{error::ApplicationError, ports::ResultsTreePort};

/// What to do when a scenario's metadata file is missing or unparsable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Abort the whole scan on the first malformed file
    #[default]
    FailFast,
    /// Log, record the scenario as skipped and keep going
    SkipMalformed,
}

/// A scenario left out of the leaderboard under [`ScanPolicy::SkipMalformed`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedScenario {
    pub agent: AgentName,
    pub scenario: EpisodeName,
    pub reason: String,
}

/// Everything a scan produces
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// Metadata per scenario; the last agent scanned wins
    pub scenario_meta: BTreeMap<EpisodeName, ScenarioMeta>,
    /// Best agent per scenario
    pub leaderboard: Leaderboard,
    /// Agent/scenario membership
    pub index: ScenarioIndex,
    /// Scenarios whose metadata could not be read
    pub skipped: Vec<SkippedScenario>,
}

/// Service building leaderboard metadata from the results tree
pub struct ResultsScanService {
    tree: Arc<dyn ResultsTreePort>,
    policy: ScanPolicy,
}

impl fmt::Debug for ResultsScanService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultsScanService")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl ResultsScanService {
    /// Create a scan service with the given malformed-metadata policy
    pub fn new(tree: Arc<dyn ResultsTreePort>, policy: ScanPolicy) -> Self {
        Self { tree, policy }
    }

    /// Policy in effect
    pub const fn policy(&self) -> ScanPolicy {
        self.policy
    }

    /// Agents present under the results root, sorted by name
    pub async fn discover_agents(&self) -> Result<Vec<AgentName>, ApplicationError> {
        self.tree.list_agents().await
    }

    /// Scan the scenarios of `agents`, in order
    #[instrument(skip(self, agents), fields(agents = agents.len(), policy = ?self.policy))]
    pub async fn scan(&self, agents: &[AgentName]) -> Result<ScanOutcome, ApplicationError> {
        let start = Instant::now();
        let mut outcome = ScanOutcome::default();

        for agent in agents {
            outcome.index.add_agent(agent);

            for scenario in self.tree.list_scenarios(agent).await? {
                outcome.index.record(agent, &scenario);

                match self.tree.read_scenario_meta(agent, &scenario).await {
                    Ok(meta) => {
                        outcome.leaderboard.offer(&scenario, agent, &meta);
                        outcome.scenario_meta.insert(scenario.clone(), meta);
                    },
                    Err(err @ ApplicationError::MalformedMetadata { .. })
                        if self.policy == ScanPolicy::SkipMalformed =>
                    {
                        warn!(
                            agent = %agent,
                            scenario = %scenario,
                            error = %err,
                            "Skipping scenario with malformed metadata"
                        );
                        outcome.skipped.push(SkippedScenario {
                            agent: agent.clone(),
                            scenario: scenario.clone(),
                            reason: err.to_string(),
                        });
                    },
                    Err(err) => return Err(err),
                }

                outcome.leaderboard.record_participant(&scenario);
            }
        }

        info!(
            scenarios = outcome.leaderboard.len(),
            skipped = outcome.skipped.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Results scan complete"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use super::*;
    use crate::ports::MockResultsTreePort;

    fn agent(name: &str) -> AgentName {
        AgentName::new(name).unwrap()
    }

    fn scenario(name: &str) -> EpisodeName {
        EpisodeName::new(name).unwrap()
    }

    /// Tree where every (agent, scenario) maps to metadata or a parse failure
    fn tree(runs: &[(&str, &str, Option<i64>)]) -> MockResultsTreePort {
        let mut by_agent: HashMap<AgentName, Vec<EpisodeName>> = HashMap::new();
        let mut metas: HashMap<(AgentName, EpisodeName), Option<i64>> = HashMap::new();
        for (a, s, steps) in runs {
            by_agent.entry(agent(a)).or_default().push(scenario(s));
            metas.insert((agent(a), scenario(s)), *steps);
        }

        let mut mock = MockResultsTreePort::new();
        let mut agents: Vec<AgentName> = by_agent.keys().cloned().collect();
        agents.sort();
        mock.expect_list_agents()
            .returning(move || Ok(agents.clone()));
        mock.expect_list_scenarios()
            .returning(move |a| Ok(by_agent.get(a).cloned().unwrap_or_default()));
        mock.expect_read_scenario_meta().returning(move |a, s| {
            match metas.get(&(a.clone(), s.clone())).copied().flatten() {
                #[allow(clippy::cast_precision_loss)]
                Some(steps) => Ok(ScenarioMeta::new(steps, steps as f64 * 10.0)),
                None => Err(ApplicationError::MalformedMetadata {
                    path: PathBuf::from(format!("{a}/{s}/episode_meta.json")),
                    reason: "expected value at line 1 column 1".into(),
                }),
            }
        });
        mock
    }

    #[tokio::test]
    async fn best_agent_is_the_one_that_played_longest() {
        let service = ResultsScanService::new(
            Arc::new(tree(&[("A", "s1", Some(10)), ("B", "s1", Some(20))])),
            ScanPolicy::FailFast,
        );

        let outcome = service.scan(&[agent("A"), agent("B")]).await.unwrap();
        let entry = outcome.leaderboard.get(&scenario("s1")).unwrap();

        assert_eq!(entry.best_agent, Some(agent("B")));
        assert_eq!(entry.best_value, 20);
        assert_eq!(entry.cumulative_reward_of_best, Some(200.0));
        assert_eq!(entry.participant_count, 2);
    }

    #[tokio::test]
    async fn ties_go_to_the_agent_scanned_first() {
        let service = ResultsScanService::new(
            Arc::new(tree(&[("A", "s1", Some(15)), ("B", "s1", Some(15))])),
            ScanPolicy::FailFast,
        );

        let outcome = service.scan(&[agent("A"), agent("B")]).await.unwrap();
        assert_eq!(outcome.leaderboard.best_agent(&scenario("s1")), Some(&agent("A")));

        // Reversed order flips the winner
        let outcome = service.scan(&[agent("B"), agent("A")]).await.unwrap();
        assert_eq!(outcome.leaderboard.best_agent(&scenario("s1")), Some(&agent("B")));
    }

    #[tokio::test]
    async fn scenario_meta_keeps_last_scanned_agent() {
        let service = ResultsScanService::new(
            Arc::new(tree(&[("A", "s1", Some(30)), ("B", "s1", Some(5))])),
            ScanPolicy::FailFast,
        );

        let outcome = service.scan(&[agent("A"), agent("B")]).await.unwrap();

        assert_eq!(outcome.scenario_meta[&scenario("s1")].nb_timestep_played, 5);
        assert_eq!(outcome.leaderboard.get(&scenario("s1")).unwrap().best_value, 30);
    }

    #[tokio::test]
    async fn malformed_metadata_is_fatal_by_default() {
        let service = ResultsScanService::new(
            Arc::new(tree(&[("A", "s1", Some(10)), ("B", "s1", None)])),
            ScanPolicy::FailFast,
        );

        let err = service.scan(&[agent("A"), agent("B")]).await.unwrap_err();
        assert!(matches!(err, ApplicationError::MalformedMetadata { .. }));
    }

    #[tokio::test]
    async fn skip_policy_counts_participant_but_not_result() {
        let service = ResultsScanService::new(
            Arc::new(tree(&[
                ("A", "s1", None),
                ("B", "s1", Some(7)),
                ("B", "s2", Some(3)),
            ])),
            ScanPolicy::SkipMalformed,
        );

        let outcome = service.scan(&[agent("A"), agent("B")]).await.unwrap();
        let entry = outcome.leaderboard.get(&scenario("s1")).unwrap();

        assert_eq!(entry.participant_count, 2);
        assert_eq!(entry.best_agent, Some(agent("B")));
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].agent, agent("A"));
        assert_eq!(outcome.skipped[0].scenario, scenario("s1"));
        assert_eq!(outcome.leaderboard.len(), 2);
    }

    #[tokio::test]
    async fn skipped_only_scenario_has_no_best_agent() {
        let service = ResultsScanService::new(
            Arc::new(tree(&[("A", "s1", None)])),
            ScanPolicy::SkipMalformed,
        );

        let outcome = service.scan(&[agent("A")]).await.unwrap();
        let entry = outcome.leaderboard.get(&scenario("s1")).unwrap();

        assert!(entry.best_agent.is_none());
        assert_eq!(entry.participant_count, 1);
        assert!(!outcome.scenario_meta.contains_key(&scenario("s1")));
    }

    #[tokio::test]
    async fn index_tracks_membership() {
        let service = ResultsScanService::new(
            Arc::new(tree(&[
                ("A", "s1", Some(1)),
                ("A", "s2", Some(1)),
                ("B", "s2", Some(1)),
            ])),
            ScanPolicy::FailFast,
        );

        let agents = service.discover_agents().await.unwrap();
        let outcome = service.scan(&agents).await.unwrap();

        assert_eq!(outcome.index.scenarios().len(), 2);
        assert_eq!(outcome.index.agents_of(&scenario("s2")), &[agent("A"), agent("B")]);
        assert_eq!(outcome.index.scenarios_of(&agent("B")), &[scenario("s2")]);
    }

    #[tokio::test]
    async fn listing_errors_propagate() {
        let mut mock = MockResultsTreePort::new();
        mock.expect_list_scenarios().returning(|a| {
            Err(ApplicationError::io(
                PathBuf::from(a.as_str()),
                std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            ))
        });
        let service = ResultsScanService::new(Arc::new(mock), ScanPolicy::SkipMalformed);

        let err = service.scan(&[agent("A")]).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Io { .. }));
    }

    #[test]
    fn policy_deserializes_from_snake_case() {
        let policy: ScanPolicy = serde_json::from_str("\"skip_malformed\"").unwrap();
        assert_eq!(policy, ScanPolicy::SkipMalformed);
        assert_eq!(ScanPolicy::default(), ScanPolicy::FailFast);
    }
}
