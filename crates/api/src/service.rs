//! Project CRUD on top of a [`RecordStore`].
//!
//! Every operation loads the full collection, works on the in-memory
//! snapshot and (for mutations) saves the full collection back. Mutations
//! run under a single writer lock so concurrent requests in this process
//! cannot lose each other's updates; reads are not serialized.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use folio_core::error::CoreError;
use folio_core::project::{
    new_record_id, next_update_timestamp, parse_comments, require_description, split_hashtags,
    supplied, PROJECT_ENTITY,
};
use folio_core::upload::public_path;
use folio_db::models::project::{CreateProject, ProjectRecord, UpdateProject};
use folio_db::RecordStore;
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};
use crate::upload::{discard_upload, remove_image, StoredUpload};

pub struct ProjectService {
    store: Arc<dyn RecordStore>,
    upload_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl ProjectService {
    pub fn new(store: Arc<dyn RecordStore>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            upload_dir: upload_dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Directory holding uploaded images.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Whether the underlying document is readable.
    pub async fn store_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Record store health check failed");
                false
            }
        }
    }

    /// Return the full collection in stored order.
    pub async fn list(&self) -> AppResult<Vec<ProjectRecord>> {
        Ok(self.store.load_all().await?)
    }

    /// Return the record with `id`.
    pub async fn get(&self, id: &str) -> AppResult<ProjectRecord> {
        self.store
            .load_all()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Validate `input`, append a new record and persist.
    ///
    /// On failure a freshly stored `image` is removed again.
    pub async fn create(
        &self,
        input: CreateProject,
        image: Option<StoredUpload>,
    ) -> AppResult<ProjectRecord> {
        let result = self.create_record(input, image.as_ref()).await;
        if result.is_err() {
            self.discard(image.as_ref()).await;
        }
        result
    }

    async fn create_record(
        &self,
        input: CreateProject,
        image: Option<&StoredUpload>,
    ) -> AppResult<ProjectRecord> {
        let description = require_description(input.description.as_deref())?.to_string();
        let hashtags = supplied(input.hashtags.as_deref())
            .map(split_hashtags)
            .unwrap_or_default();
        let comments = match supplied(input.comments.as_deref()) {
            Some(raw) => parse_comments(raw)?,
            None => Vec::new(),
        };

        let now = Utc::now();
        let record = ProjectRecord {
            id: new_record_id(),
            description,
            hashtags,
            comments,
            github_link: supplied(input.github_link.as_deref()).map(str::to_string),
            hosted_link: supplied(input.hosted_link.as_deref()).map(str::to_string),
            image: image.map(|upload| public_path(&upload.filename)),
            created_at: now,
            updated_at: now,
        };

        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load_all().await?;
        records.push(record.clone());
        self.store.save_all(&records).await?;

        tracing::info!(id = %record.id, "Created project");
        Ok(record)
    }

    /// Apply the supplied fields of `input` to the record with `id`.
    ///
    /// Absent or empty fields keep their stored value. A new `image`
    /// replaces the old one, whose file is removed once the collection has
    /// been saved. On failure a freshly stored `image` is removed again.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateProject,
        image: Option<StoredUpload>,
    ) -> AppResult<ProjectRecord> {
        let result = self.update_record(id, input, image.as_ref()).await;
        if result.is_err() {
            self.discard(image.as_ref()).await;
        }
        result
    }

    async fn update_record(
        &self,
        id: &str,
        input: UpdateProject,
        image: Option<&StoredUpload>,
    ) -> AppResult<ProjectRecord> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load_all().await?;
        let index = records
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        // Unknown ids are reported before any input is parsed; malformed
        // input still fails before anything is saved.
        let hashtags = supplied(input.hashtags.as_deref()).map(split_hashtags);
        let comments = supplied(input.comments.as_deref())
            .map(parse_comments)
            .transpose()?;

        let record = &mut records[index];
        if let Some(description) = supplied(input.description.as_deref()) {
            record.description = description.to_string();
        }
        if let Some(hashtags) = hashtags {
            record.hashtags = hashtags;
        }
        if let Some(comments) = comments {
            record.comments = comments;
        }
        if let Some(link) = supplied(input.github_link.as_deref()) {
            record.github_link = Some(link.to_string());
        }
        if let Some(link) = supplied(input.hosted_link.as_deref()) {
            record.hosted_link = Some(link.to_string());
        }
        record.updated_at = next_update_timestamp(record.updated_at);

        let replaced_image = match image {
            Some(upload) => record.image.replace(public_path(&upload.filename)),
            None => None,
        };
        let updated = record.clone();

        self.store.save_all(&records).await?;

        if let Some(old) = replaced_image {
            self.remove_orphan(&old).await;
        }

        tracing::info!(id = %updated.id, "Updated project");
        Ok(updated)
    }

    /// Remove the record with `id` and its image file.
    pub async fn delete(&self, id: &str) -> AppResult<ProjectRecord> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.store.load_all().await?;
        let index = records
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found(id))?;

        let removed = records.remove(index);
        self.store.save_all(&records).await?;

        if let Some(image) = &removed.image {
            self.remove_orphan(image).await;
        }

        tracing::info!(id = %removed.id, "Deleted project");
        Ok(removed)
    }

    /// Remove an image file no record references any more.
    ///
    /// The collection has already been saved at this point, so a failure
    /// only leaves a stray file behind and is logged rather than returned.
    async fn remove_orphan(&self, image_path: &str) {
        if let Err(e) = remove_image(&self.upload_dir, image_path).await {
            tracing::warn!(image = %image_path, error = %e, "Failed to remove orphaned image");
        }
    }

    async fn discard(&self, image: Option<&StoredUpload>) {
        if let Some(upload) = image {
            discard_upload(&self.upload_dir, upload).await;
        }
    }
}

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: PROJECT_ENTITY,
        id: id.to_string(),
    })
}
