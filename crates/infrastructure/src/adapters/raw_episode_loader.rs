//! Raw episode loader over `<results_root>/<agent>/<episode>/`

use std::path::{Path, PathBuf};

use application::{error::ApplicationError, ports::RawEpisodeSource};
use async_trait::async_trait;
use domain::{EpisodeKey, RawEpisode, RawEpisodeFile, ScenarioMeta};
use tracing::{debug, instrument};

/// Loads the recorded files of one run from the results tree
#[derive(Debug, Clone)]
pub struct DirectoryEpisodeLoader {
    results_root: PathBuf,
}

impl DirectoryEpisodeLoader {
    pub fn new(results_root: impl Into<PathBuf>) -> Self {
        Self {
            results_root: results_root.into(),
        }
    }

    /// Folder holding the raw records of `key`
    #[must_use]
    pub fn episode_dir(&self, key: &EpisodeKey) -> PathBuf {
        self.results_root
            .join(key.agent().as_str())
            .join(key.episode().as_str())
    }
}

async fn list_files(dir: &Path) -> Result<Vec<RawEpisodeFile>, ApplicationError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ApplicationError::io(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ApplicationError::io(dir, e))?
    {
        let metadata = entry
            .metadata()
            .await
            .map_err(|e| ApplicationError::io(entry.path(), e))?;
        if metadata.is_file() {
            files.push(RawEpisodeFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                size_bytes: metadata.len(),
            });
        }
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

#[async_trait]
impl RawEpisodeSource for DirectoryEpisodeLoader {
    #[instrument(skip(self), fields(key = %key))]
    async fn load_raw_episode(&self, key: &EpisodeKey) -> Result<RawEpisode, ApplicationError> {
        let directory = self.episode_dir(key);

        let is_dir = tokio::fs::metadata(&directory)
            .await
            .is_ok_and(|m| m.is_dir());
        if !is_dir {
            return Err(ApplicationError::RawDataMissing {
                key: key.clone(),
                path: directory,
            });
        }

        let meta_path = directory.join(ScenarioMeta::FILE_NAME);
        let meta_bytes = tokio::fs::read(&meta_path)
            .await
            .map_err(|e| ApplicationError::Compute {
                key: key.clone(),
                reason: format!("cannot read {}: {e}", meta_path.display()),
            })?;
        let meta = ScenarioMeta::from_json_slice(&meta_bytes).map_err(|e| {
            ApplicationError::Compute {
                key: key.clone(),
                reason: format!("invalid {}: {e}", meta_path.display()),
            }
        })?;

        let files = list_files(&directory).await?;
        debug!(files = files.len(), "Raw episode loaded");

        Ok(RawEpisode {
            key: key.clone(),
            directory,
            meta,
            files,
        })
    }
}
