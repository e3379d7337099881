//! Which agents ran which scenarios

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::value_objects::{AgentName, EpisodeName};

/// Bidirectional agent/scenario membership built from the results tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioIndex {
    scenarios: BTreeSet<EpisodeName>,
    scenarios_by_agent: BTreeMap<AgentName, Vec<EpisodeName>>,
    agents_by_scenario: BTreeMap<EpisodeName, Vec<AgentName>>,
}

impl ScenarioIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent even if it has no scenario folders
    pub fn add_agent(&mut self, agent: &AgentName) {
        self.scenarios_by_agent.entry(agent.clone()).or_default();
    }

    /// Record that `agent` has a results folder for `scenario`
    pub fn record(&mut self, agent: &AgentName, scenario: &EpisodeName) {
        self.scenarios.insert(scenario.clone());

        let scenarios = self.scenarios_by_agent.entry(agent.clone()).or_default();
        if !scenarios.contains(scenario) {
            scenarios.push(scenario.clone());
        }

        let agents = self.agents_by_scenario.entry(scenario.clone()).or_default();
        if !agents.contains(agent) {
            agents.push(agent.clone());
        }
    }

    /// Every scenario any agent ran
    pub const fn scenarios(&self) -> &BTreeSet<EpisodeName> {
        &self.scenarios
    }

    /// Scenarios of one agent, in scan order
    pub fn scenarios_of(&self, agent: &AgentName) -> &[EpisodeName] {
        self.scenarios_by_agent
            .get(agent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Agents that ran one scenario, in scan order
    pub fn agents_of(&self, scenario: &EpisodeName) -> &[AgentName] {
        self.agents_by_scenario
            .get(scenario)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Agents known to the index
    pub fn agents(&self) -> impl Iterator<Item = &AgentName> {
        self.scenarios_by_agent.keys()
    }
}
