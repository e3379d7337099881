//! Gridscope CLI
//!
//! Command-line access to the results dashboard: agents, scenarios, the
//! best-agent leaderboard and per-episode analytics.

#![allow(clippy::print_stdout)]

mod render;

use std::path::{Path, PathBuf};

use application::ports::ArtifactDiskStore;
use clap::{Parser, Subcommand};
use domain::EpisodeName;
use infrastructure::{AppConfig, FsArtifactStore, init_telemetry, initialize};
use tracing::debug;

/// Gridscope CLI
#[derive(Parser)]
#[command(name = "gridscope")]
#[command(author, version, about = "Power grid agent results explorer", long_about = None)]
struct Cli {
    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "GRIDSCOPE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print JSON instead of aligned text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List agents found under the results root
    Agents,

    /// List scenarios and the agents that ran them
    Scenarios,

    /// Best agent per scenario by time steps survived
    Leaderboard,

    /// Show the metadata recorded for a scenario
    Meta {
        /// Scenario name
        scenario: String,
    },

    /// Compute (or load from cache) the analytics of one episode
    Episode {
        /// Agent name
        agent: String,

        /// Episode (scenario) name
        episode: String,
    },

    /// Remove the cache directory; fails unless it is empty
    ClearCache,

    /// Print the effective configuration
    Config,
}

/// Log filter override from verbosity count; `None` keeps the configured one
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_deref())?;

    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.telemetry = config.telemetry.with_log_filter(filter);
    }
    init_telemetry(&config.telemetry)?;
    debug!(?config, "Effective configuration");

    match cli.command {
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            println!("# resolved paths");
            println!("{}", toml::to_string_pretty(&config.resolved_paths())?);
        },

        Commands::ClearCache => {
            let store = FsArtifactStore::new(config.resolved_paths().cache_root);
            store.clear().await?;
            println!("Cache cleared: {}", store.root().display());
        },

        command => {
            let dashboard = initialize(&config).await?;

            match command {
                Commands::Agents => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(dashboard.agents())?);
                    } else {
                        print!("{}", render::agents(dashboard.agents()));
                    }
                },

                Commands::Scenarios => {
                    if cli.json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(dashboard.scenario_index())?
                        );
                    } else {
                        print!("{}", render::scenarios(dashboard.scenario_index()));
                    }
                },

                Commands::Leaderboard => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(dashboard.leaderboard())?);
                    } else {
                        print!("{}", render::leaderboard(dashboard.leaderboard()));
                        if !dashboard.skipped_scenarios().is_empty() {
                            print!("{}", render::skipped(dashboard.skipped_scenarios()));
                        }
                    }
                },

                Commands::Meta { scenario } => {
                    let name = EpisodeName::new(scenario)?;
                    let meta = dashboard
                        .scenario_meta()
                        .get(&name)
                        .ok_or_else(|| anyhow::anyhow!("Unknown scenario: {name}"))?;
                    println!("{}", serde_json::to_string_pretty(meta)?);
                },

                Commands::Episode { agent, episode } => {
                    let artifact = dashboard.get_episode(&agent, &episode).await?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(artifact.as_ref())?);
                    } else {
                        print!("{}", render::artifact(&artifact));
                    }
                    debug!(stats = ?dashboard.cache_stats(), "Memory tier");
                },

                Commands::Config | Commands::ClearCache => {},
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_verbosity_zero_keeps_config() {
        assert_eq!(log_filter_from_verbosity(0), None);
    }

    #[test]
    fn log_filter_verbosity_one() {
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
    }

    #[test]
    fn log_filter_verbosity_two() {
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
    }

    #[test]
    fn log_filter_verbosity_three_or_more() {
        assert_eq!(log_filter_from_verbosity(3), Some("trace"));
        assert_eq!(log_filter_from_verbosity(10), Some("trace"));
    }

    #[test]
    fn parses_episode_command() {
        let cli = Cli::try_parse_from(["gridscope", "-vv", "--json", "episode", "greedy", "000"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Episode { ref agent, ref episode } if agent == "greedy" && episode == "000"
        ));
    }

    #[test]
    fn parses_config_path() {
        let cli =
            Cli::try_parse_from(["gridscope", "--config", "/etc/gridscope.toml", "leaderboard"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/gridscope.toml")));
        assert!(matches!(cli.command, Commands::Leaderboard));
    }

    #[test]
    fn meta_requires_scenario() {
        assert!(Cli::try_parse_from(["gridscope", "meta"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
