//! Adapters implementing application ports over the results tree

mod episode_compute_adapter;
mod network_layout_loader;
mod raw_episode_loader;
mod results_tree_adapter;
mod summary_analytics_builder;

pub use episode_compute_adapter::EpisodeComputeAdapter;
pub use network_layout_loader::{COORDS_FILE_NAME, load_network_layout};
pub use raw_episode_loader::DirectoryEpisodeLoader;
pub use results_tree_adapter::FsResultsTree;
pub use summary_analytics_builder::SummaryAnalyticsBuilder;
