use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{ReadPolicy, RecordStore};
use crate::error::StoreError;
use crate::models::project::ProjectRecord;

/// Record store backed by a single pretty-printed JSON array on disk.
///
/// `save_all` overwrites the document in place (no temp-file swap), so a
/// crash mid-write can truncate it.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    policy: ReadPolicy,
}

impl JsonFileStore {
    /// Open the document at `path`, creating its directory and an empty
    /// `[]` document if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>, policy: ReadPolicy) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io("create directory", parent, e))?;
        }

        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StoreError::io("stat", &path, e))?;
        if !exists {
            tokio::fs::write(&path, "[]")
                .await
                .map_err(|e| StoreError::io("initialize", &path, e))?;
            tracing::info!(path = %path.display(), "Initialized empty record document");
        }

        Ok(Self { path, policy })
    }

    /// Location of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| StoreError::io("read", &self.path, e))?;
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        self.policy.resolve(self.read_document().await)
    }

    async fn save_all(&self, records: &[ProjectRecord]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| StoreError::io("write", &self.path, e))?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "Saved records");
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.read_document().await.map(|_| ())
    }
}
