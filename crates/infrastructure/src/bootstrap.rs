//! Startup wiring
//!
//! Nothing is scanned or read at load time; a host calls [`initialize`]
//! once and keeps the returned service for the lifetime of the process.

use std::{sync::Arc, time::Instant};

use application::{
    error::ApplicationError,
    ports::AnalyticsBuilderPort,
    services::{DashboardService, DashboardSnapshot, EpisodeService, ResultsScanService},
};
use tracing::{info, instrument};

use crate::{
    adapters::{
        DirectoryEpisodeLoader, EpisodeComputeAdapter, FsResultsTree, SummaryAnalyticsBuilder,
        load_network_layout,
    },
    cache::{FsArtifactStore, MokaArtifactCache},
    config::AppConfig,
};

/// Build the dashboard service with the default summary builder
pub async fn initialize(config: &AppConfig) -> Result<DashboardService, ApplicationError> {
    initialize_with(config, Arc::new(SummaryAnalyticsBuilder)).await
}

/// Build the dashboard service around a host-provided analytics builder
///
/// Resolves paths, scans the results tree, reads the optional substation
/// layout and wires both cache tiers in front of the compute gateway.
#[instrument(skip_all)]
pub async fn initialize_with(
    config: &AppConfig,
    builder: Arc<dyn AnalyticsBuilderPort>,
) -> Result<DashboardService, ApplicationError> {
    let started = Instant::now();
    let paths = config.resolved_paths();
    info!(
        results_root = %paths.results_root.display(),
        cache_root = %paths.cache_root.display(),
        "Initializing dashboard"
    );

    let memory = Arc::new(MokaArtifactCache::with_config(config.cache.moka_config()));
    let disk = Arc::new(FsArtifactStore::new(&paths.cache_root));
    let compute = Arc::new(EpisodeComputeAdapter::new(
        Arc::new(DirectoryEpisodeLoader::new(&paths.results_root)),
        builder,
    ));
    let episodes = EpisodeService::new(memory, disk, compute)
        .with_compute_timeout(config.cache.compute_timeout());

    let scanner = ResultsScanService::new(
        Arc::new(FsResultsTree::new(&paths.results_root)),
        config.scan.policy,
    );

    let env_conf_folder = paths.env_conf_folder.clone();
    let layout = tokio::task::spawn_blocking(move || load_network_layout(&env_conf_folder))
        .await
        .map_err(|e| ApplicationError::Internal(format!("layout task failed: {e}")))?;

    let snapshot = DashboardSnapshot::capture(&scanner, layout).await?;

    info!(
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "Dashboard ready"
    );
    Ok(DashboardService::new(episodes, snapshot))
}
