//! Cross-agent leaderboard: which agent went furthest on each scenario

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ScenarioMeta;
use crate::value_objects::{AgentName, EpisodeName};

/// Value a scenario starts with before any run has been offered
pub const NO_RUN_VALUE: i64 = -1;

/// Best run and participation for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Highest `nb_timestep_played` seen so far
    pub best_value: i64,
    /// Agent that reached `best_value` first
    pub best_agent: Option<AgentName>,
    /// Cumulative reward of that run
    pub cumulative_reward_of_best: Option<f64>,
    /// Number of agents with a results folder for this scenario
    pub participant_count: usize,
}

impl Default for LeaderboardEntry {
    fn default() -> Self {
        Self {
            best_value: NO_RUN_VALUE,
            best_agent: None,
            cumulative_reward_of_best: None,
            participant_count: 0,
        }
    }
}

impl LeaderboardEntry {
    /// Offer a run; it takes the lead only when strictly better
    ///
    /// Returns whether the run became the new best. Ties keep the
    /// earlier agent.
    pub fn offer(&mut self, agent: &AgentName, meta: &ScenarioMeta) -> bool {
        if self.best_value < meta.nb_timestep_played {
            self.best_value = meta.nb_timestep_played;
            self.best_agent = Some(agent.clone());
            self.cumulative_reward_of_best = Some(meta.cumulative_reward);
            true
        } else {
            false
        }
    }
}

/// Leaderboard keyed by scenario name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: BTreeMap<EpisodeName, LeaderboardEntry>,
}

impl Leaderboard {
    /// Create an empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `agent`'s run of `scenario`
    pub fn offer(&mut self, scenario: &EpisodeName, agent: &AgentName, meta: &ScenarioMeta) -> bool {
        self.entries
            .entry(scenario.clone())
            .or_default()
            .offer(agent, meta)
    }

    /// Count one more agent that has a folder for `scenario`
    pub fn record_participant(&mut self, scenario: &EpisodeName) {
        self.entries.entry(scenario.clone()).or_default().participant_count += 1;
    }

    /// Entry for a scenario
    pub fn get(&self, scenario: &EpisodeName) -> Option<&LeaderboardEntry> {
        self.entries.get(scenario)
    }

    /// Best agent for a scenario, if any run was offered
    pub fn best_agent(&self, scenario: &EpisodeName) -> Option<&AgentName> {
        self.get(scenario).and_then(|e| e.best_agent.as_ref())
    }

    /// Iterate entries in scenario name order
    pub fn iter(&self) -> impl Iterator<Item = (&EpisodeName, &LeaderboardEntry)> {
        self.entries.iter()
    }

    /// Number of scenarios on the board
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no scenario was seen
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(name: &str) -> AgentName {
        AgentName::new(name).unwrap()
    }

    fn scenario(name: &str) -> EpisodeName {
        EpisodeName::new(name).unwrap()
    }

    #[test]
    fn higher_value_takes_the_lead() {
        let mut board = Leaderboard::new();
        let s1 = scenario("s1");

        assert!(board.offer(&s1, &agent("A"), &ScenarioMeta::new(10, 1.0)));
        board.record_participant(&s1);
        assert!(board.offer(&s1, &agent("B"), &ScenarioMeta::new(20, 2.0)));
        board.record_participant(&s1);

        let entry = board.get(&s1).unwrap();
        assert_eq!(entry.best_value, 20);
        assert_eq!(entry.best_agent, Some(agent("B")));
        assert_eq!(entry.cumulative_reward_of_best, Some(2.0));
        assert_eq!(entry.participant_count, 2);
    }

    #[test]
    fn ties_keep_first_seen_agent() {
        let mut board = Leaderboard::new();
        let s1 = scenario("s1");

        board.offer(&s1, &agent("A"), &ScenarioMeta::new(15, 1.0));
        assert!(!board.offer(&s1, &agent("B"), &ScenarioMeta::new(15, 99.0)));

        assert_eq!(board.best_agent(&s1), Some(&agent("A")));
        assert_eq!(board.get(&s1).unwrap().cumulative_reward_of_best, Some(1.0));
    }

    #[test]
    fn zero_step_run_beats_empty_entry() {
        let mut board = Leaderboard::new();
        let s1 = scenario("s1");
        assert!(board.offer(&s1, &agent("A"), &ScenarioMeta::new(0, 0.0)));
        assert_eq!(board.get(&s1).unwrap().best_value, 0);
    }

    #[test]
    fn participant_without_run_leaves_best_empty() {
        let mut board = Leaderboard::new();
        let s1 = scenario("s1");
        board.record_participant(&s1);

        let entry = board.get(&s1).unwrap();
        assert_eq!(entry.best_value, NO_RUN_VALUE);
        assert!(entry.best_agent.is_none());
        assert_eq!(entry.participant_count, 1);
    }

    #[test]
    fn serializes_as_map() {
        let mut board = Leaderboard::new();
        board.offer(&scenario("s1"), &agent("A"), &ScenarioMeta::new(3, 0.5));
        let value = serde_json::to_value(&board).unwrap();
        assert_eq!(value["s1"]["best_agent"], serde_json::Value::from("A"));
    }
}
