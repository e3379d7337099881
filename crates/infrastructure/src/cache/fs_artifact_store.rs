//! Filesystem artifact tier
//!
//! Each artifact lives at `<cache_root>/<episode>/<agent>.json`. Writes go
//! through a temporary file in the same directory and are renamed into
//! place, so readers never observe a partially written artifact.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use application::{error::ApplicationError, ports::ArtifactDiskStore};
use async_trait::async_trait;
use domain::{AnalyticsArtifact, EpisodeKey};
use tracing::{debug, info, instrument, warn};

/// File extension of persisted artifacts
pub const ARTIFACT_EXTENSION: &str = "json";

/// Filesystem-backed artifact store rooted at the cache directory
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    /// Create a store rooted at `root`
    ///
    /// Nothing is created on disk until the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Cache root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the artifact for `key`
    #[must_use]
    pub fn artifact_path(&self, key: &EpisodeKey) -> PathBuf {
        self.root
            .join(key.episode().as_str())
            .join(format!("{}.{ARTIFACT_EXTENSION}", key.agent()))
    }
}

/// Write `bytes` to `path` via a sibling temporary file and an atomic rename
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ApplicationError> {
    let persist_err = |reason: String| ApplicationError::Persist {
        path: path.to_path_buf(),
        reason,
    };

    let parent = path
        .parent()
        .ok_or_else(|| persist_err("artifact path has no parent directory".to_string()))?;
    std::fs::create_dir_all(parent).map_err(|e| persist_err(e.to_string()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".artifact-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| persist_err(e.to_string()))?;
    tmp.write_all(bytes).map_err(|e| persist_err(e.to_string()))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| persist_err(e.to_string()))?;
    tmp.persist(path).map_err(|e| persist_err(e.error.to_string()))?;

    Ok(())
}

#[async_trait]
impl ArtifactDiskStore for FsArtifactStore {
    #[instrument(skip(self), fields(key = %key), level = "debug")]
    async fn exists(&self, key: &EpisodeKey) -> Result<bool, ApplicationError> {
        let path = self.artifact_path(key);
        match tokio::fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ApplicationError::io(path, e)),
        }
    }

    #[instrument(skip(self), fields(key = %key), level = "debug")]
    async fn read(&self, key: &EpisodeKey) -> Result<AnalyticsArtifact, ApplicationError> {
        let path = self.artifact_path(key);
        let bytes =
            tokio::fs::read(&path)
                .await
                .map_err(|e| ApplicationError::Deserialization {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

        let artifact: AnalyticsArtifact =
            serde_json::from_slice(&bytes).map_err(|e| ApplicationError::Deserialization {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        if artifact.key() != *key {
            warn!(path = %path.display(), stored = %artifact.key(), "Artifact belongs to another key");
            return Err(ApplicationError::Deserialization {
                path,
                reason: format!("artifact was stored for {}", artifact.key()),
            });
        }

        debug!(bytes = bytes.len(), "Artifact read from disk");
        Ok(artifact)
    }

    #[instrument(skip(self, artifact), fields(key = %key), level = "debug")]
    async fn write(
        &self,
        key: &EpisodeKey,
        artifact: &AnalyticsArtifact,
    ) -> Result<(), ApplicationError> {
        let path = self.artifact_path(key);
        let bytes = serde_json::to_vec(artifact).map_err(|e| ApplicationError::Persist {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&target, &bytes))
            .await
            .map_err(|e| ApplicationError::Persist {
                path,
                reason: format!("write task failed: {e}"),
            })??;

        debug!("Artifact written to disk");
        Ok(())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn clear(&self) -> Result<(), ApplicationError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Cache root absent, nothing to clear");
                return Ok(());
            },
            Err(e) => return Err(ApplicationError::io(&self.root, e)),
        };

        if entries
            .next_entry()
            .await
            .map_err(|e| ApplicationError::io(&self.root, e))?
            .is_some()
        {
            return Err(ApplicationError::NotEmpty {
                path: self.root.clone(),
            });
        }

        // A writer may have filled the root since the check above
        tokio::fs::remove_dir(&self.root)
            .await
            .map_err(|e| remove_root_error(&self.root, e))?;
        info!("Cache root removed");
        Ok(())
    }
}

fn remove_root_error(root: &Path, err: std::io::Error) -> ApplicationError {
    if err.kind() == std::io::ErrorKind::DirectoryNotEmpty {
        ApplicationError::NotEmpty {
            path: root.to_path_buf(),
        }
    } else {
        ApplicationError::io(root, err)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn key(agent: &str, episode: &str) -> EpisodeKey {
        EpisodeKey::parse(agent, episode).unwrap()
    }

    fn store() -> (TempDir, FsArtifactStore) {
        let dir = TempDir::new().unwrap();
        let store = FsArtifactStore::new(dir.path().join("_cache"));
        (dir, store)
    }

    #[test]
    fn artifact_path_groups_by_episode() {
        let store = FsArtifactStore::new("/data/agents/_cache");
        assert_eq!(
            store.artifact_path(&key("greedy", "000")),
            PathBuf::from("/data/agents/_cache/000/greedy.json")
        );
    }

    #[tokio::test]
    async fn exists_is_false_before_write_and_creates_nothing() {
        let (_dir, store) = store();

        assert!(!store.exists(&key("greedy", "000")).await.unwrap());
        assert!(!store.root().exists());
    }

    #[tokio::test]
    async fn write_then_read_preserves_payload() {
        let (_dir, store) = store();
        let k = key("greedy", "000");
        let artifact = AnalyticsArtifact::new(&k, json!({"reward": 0.1, "steps": [1, 2, 3]}));

        store.write(&k, &artifact).await.unwrap();

        assert!(store.exists(&k).await.unwrap());
        let loaded = store.read(&k).await.unwrap();
        assert_eq!(loaded, artifact);
    }

    #[tokio::test]
    async fn write_leaves_no_temporary_files() {
        let (_dir, store) = store();
        let k = key("greedy", "000");
        store
            .write(&k, &AnalyticsArtifact::new(&k, json!(1)))
            .await
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(store.root().join("000"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["greedy.json".to_string()]);
    }

    #[tokio::test]
    async fn write_overwrites_previous_artifact() {
        let (_dir, store) = store();
        let k = key("greedy", "000");
        store
            .write(&k, &AnalyticsArtifact::new(&k, json!("old")))
            .await
            .unwrap();
        store
            .write(&k, &AnalyticsArtifact::new(&k, json!("new")))
            .await
            .unwrap();

        assert_eq!(store.read(&k).await.unwrap().payload, json!("new"));
    }

    #[tokio::test]
    async fn read_missing_is_deserialization_error() {
        let (_dir, store) = store();
        let err = store.read(&key("greedy", "000")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Deserialization { .. }));
    }

    #[tokio::test]
    async fn read_corrupt_file_is_deserialization_error() {
        let (_dir, store) = store();
        let k = key("greedy", "000");
        let path = store.artifact_path(&k);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"{not json").unwrap();

        assert!(store.exists(&k).await.unwrap());
        let err = store.read(&k).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Deserialization { .. }));
    }

    #[tokio::test]
    async fn read_rejects_artifact_of_other_key() {
        let (_dir, store) = store();
        let k = key("greedy", "000");
        let other = key("random", "000");
        let path = store.artifact_path(&k);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let bytes = serde_json::to_vec(&AnalyticsArtifact::new(&other, json!(1))).unwrap();
        std::fs::write(&path, bytes).unwrap();

        let err = store.read(&k).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Deserialization { .. }));
    }

    #[tokio::test]
    async fn directory_at_artifact_path_does_not_exist() {
        let (_dir, store) = store();
        let k = key("greedy", "000");
        std::fs::create_dir_all(store.artifact_path(&k)).unwrap();

        assert!(!store.exists(&k).await.unwrap());
    }

    #[tokio::test]
    async fn clear_missing_root_is_ok() {
        let (_dir, store) = store();
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn clear_removes_empty_root() {
        let (_dir, store) = store();
        std::fs::create_dir_all(store.root()).unwrap();

        store.clear().await.unwrap();

        assert!(!store.root().exists());
    }

    #[tokio::test]
    async fn clear_refuses_non_empty_root() {
        let (_dir, store) = store();
        let k = key("greedy", "000");
        store
            .write(&k, &AnalyticsArtifact::new(&k, json!(1)))
            .await
            .unwrap();

        let err = store.clear().await.unwrap_err();

        assert!(matches!(err, ApplicationError::NotEmpty { .. }));
        assert!(store.exists(&k).await.unwrap());
    }

    #[test]
    fn root_filled_during_removal_is_not_empty() {
        let root = Path::new("/data/agents/_cache");

        let raced = remove_root_error(
            root,
            std::io::Error::from(std::io::ErrorKind::DirectoryNotEmpty),
        );
        let denied = remove_root_error(
            root,
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );

        assert!(matches!(raced, ApplicationError::NotEmpty { ref path } if path.as_path() == root));
        assert!(matches!(denied, ApplicationError::Io { .. }));
    }
}
