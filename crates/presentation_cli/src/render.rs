//! Plain-text rendering of dashboard views

use std::fmt::Write;

use application::services::SkippedScenario;
use domain::{AgentName, AnalyticsArtifact, Leaderboard, ScenarioIndex};

const NO_AGENT: &str = "-";

pub fn agents(agents: &[AgentName]) -> String {
    agents.iter().fold(String::new(), |mut out, agent| {
        let _ = writeln!(out, "{agent}");
        out
    })
}

pub fn scenarios(index: &ScenarioIndex) -> String {
    let width = index
        .scenarios()
        .iter()
        .map(|s| s.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for scenario in index.scenarios() {
        let agents: Vec<&str> = index
            .agents_of(scenario)
            .iter()
            .map(AgentName::as_str)
            .collect();
        let _ = writeln!(out, "{:<width$}  {}", scenario.as_str(), agents.join(", "));
    }
    out
}

pub fn leaderboard(board: &Leaderboard) -> String {
    let rows: Vec<[String; 5]> = board
        .iter()
        .map(|(scenario, entry)| {
            [
                scenario.to_string(),
                entry
                    .best_agent
                    .as_ref()
                    .map_or_else(|| NO_AGENT.to_string(), ToString::to_string),
                entry.best_value.to_string(),
                entry
                    .cumulative_reward_of_best
                    .map_or_else(|| NO_AGENT.to_string(), |r| format!("{r:.2}")),
                entry.participant_count.to_string(),
            ]
        })
        .collect();

    let header = ["SCENARIO", "BEST AGENT", "STEPS", "REWARD", "AGENTS"].map(String::from);
    let mut widths = header.clone().map(|h| h.len());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

pub fn skipped(skipped: &[SkippedScenario]) -> String {
    let mut out = String::from("\nSkipped (malformed metadata):\n");
    for s in skipped {
        let _ = writeln!(out, "  {}/{}: {}", s.agent, s.scenario, s.reason);
    }
    out
}

pub fn artifact(artifact: &AnalyticsArtifact) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "agent:       {}", artifact.agent);
    let _ = writeln!(out, "episode:     {}", artifact.episode);
    let _ = writeln!(out, "computed at: {}", artifact.computed_at.to_rfc3339());
    let body = serde_json::to_string_pretty(&artifact.payload).unwrap_or_default();
    let _ = writeln!(out, "{body}");
    out
}
