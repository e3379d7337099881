//! Application services - Use case implementations

mod dashboard_service;
mod episode_service;
mod results_scan_service;

pub use dashboard_service::{DashboardService, DashboardSnapshot};
pub use episode_service::EpisodeService;
pub use results_scan_service::{ResultsScanService, ScanOutcome, ScanPolicy, SkippedScenario};
