//! Dashboard service - the boundary the UI layer talks to
//!
//! Holds the immutable snapshot produced by the startup scan next to the
//! episode orchestrator. New results on disk are only picked up by building
//! a fresh service.

use std::{collections::BTreeMap, fmt, sync::Arc};

use domain::{
    AgentName, AnalyticsArtifact, EpisodeName, Leaderboard, NetworkLayout, ScenarioIndex,
    ScenarioMeta,
};
use tracing::{info, instrument};

use super::{EpisodeService, ResultsScanService, ScanOutcome, SkippedScenario};
use crate::{error::ApplicationError, ports::CacheStats};

/// Read-only state captured once at startup
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    agents: Vec<AgentName>,
    scan: ScanOutcome,
    network_layout: Option<NetworkLayout>,
}

impl DashboardSnapshot {
    /// Assemble a snapshot from a finished scan
    pub fn new(
        agents: Vec<AgentName>,
        scan: ScanOutcome,
        network_layout: Option<NetworkLayout>,
    ) -> Self {
        Self {
            agents,
            scan,
            network_layout,
        }
    }

    /// Discover agents, scan them, and capture the result
    #[instrument(skip(scanner, network_layout), fields(policy = ?scanner.policy()))]
    pub async fn capture(
        scanner: &ResultsScanService,
        network_layout: Option<NetworkLayout>,
    ) -> Result<Self, ApplicationError> {
        let agents = scanner.discover_agents().await?;
        let scan = scanner.scan(&agents).await?;
        info!(
            agents = agents.len(),
            scenarios = scan.index.scenarios().len(),
            layout = network_layout.is_some(),
            "Dashboard snapshot captured"
        );
        Ok(Self::new(agents, scan, network_layout))
    }
}

/// Facade exposing episodes, leaderboard and metadata to the UI
pub struct DashboardService {
    episodes: EpisodeService,
    snapshot: Arc<DashboardSnapshot>,
}

impl fmt::Debug for DashboardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardService")
            .field("episodes", &self.episodes)
            .field("agents", &self.snapshot.agents.len())
            .field("scenarios", &self.snapshot.scan.leaderboard.len())
            .finish()
    }
}

impl DashboardService {
    /// Create a dashboard service over a captured snapshot
    pub fn new(episodes: EpisodeService, snapshot: DashboardSnapshot) -> Self {
        Self {
            episodes,
            snapshot: Arc::new(snapshot),
        }
    }

    /// Analytics for one (agent, episode), computed on first request
    pub async fn get_episode(
        &self,
        agent: &str,
        episode: &str,
    ) -> Result<Arc<AnalyticsArtifact>, ApplicationError> {
        self.episodes.get_episode(agent, episode).await
    }

    /// Best agent per scenario
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.snapshot.scan.leaderboard
    }

    /// Metadata per scenario
    pub fn scenario_meta(&self) -> &BTreeMap<EpisodeName, ScenarioMeta> {
        &self.snapshot.scan.scenario_meta
    }

    /// Agents found at startup, in scan order
    pub fn agents(&self) -> &[AgentName] {
        &self.snapshot.agents
    }

    /// Agent/scenario membership
    pub fn scenario_index(&self) -> &ScenarioIndex {
        &self.snapshot.scan.index
    }

    /// Substation layout, if one was configured and readable
    pub fn network_layout(&self) -> Option<&NetworkLayout> {
        self.snapshot.network_layout.as_ref()
    }

    /// Scenarios left out because their metadata was malformed
    pub fn skipped_scenarios(&self) -> &[SkippedScenario] {
        &self.snapshot.scan.skipped
    }

    /// In-memory tier statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.episodes.memory_stats()
    }

    /// Shared handle on the snapshot for request handlers
    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// The underlying episode orchestrator
    pub const fn episodes(&self) -> &EpisodeService {
        &self.episodes
    }
}
