//! Upload mechanism for project payloads.
//!
//! [`ProjectForm`] accepts either `multipart/form-data` (text fields plus an
//! optional `image` file) or `application/json`. An uploaded image is
//! written to the upload directory before the handler runs; the handler
//! receives only the stored filename.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use folio_core::upload::{generate_stored_filename, image_extension, stored_filename, IMAGE_FIELD};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// An image already written to the upload directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    /// Generated filename inside the upload directory.
    pub filename: String,
}

/// Typed project payload plus the optional stored image.
#[derive(Debug)]
pub struct ProjectForm<T> {
    pub input: T,
    pub image: Option<StoredUpload>,
}

impl<T> FromRequest<AppState> for ProjectForm<T>
where
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::from_body_rejection(e.status(), e.body_text()))?;
            read_multipart(multipart, state.projects.upload_dir()).await
        } else if content_type.starts_with("application/json") {
            let Json(input) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::from_body_rejection(e.status(), e.body_text()))?;
            Ok(Self { input, image: None })
        } else if content_type.is_empty() {
            // No body at all: every field absent.
            Ok(Self {
                input: from_fields(Map::new())?,
                image: None,
            })
        } else {
            Err(AppError::UnsupportedMediaType(content_type))
        }
    }
}

/// Collect text fields and store the `image` file, if any.
///
/// If anything fails after the image was written, the file is removed again.
async fn read_multipart<T: DeserializeOwned>(
    mut multipart: Multipart,
    upload_dir: &Path,
) -> AppResult<ProjectForm<T>> {
    let mut image: Option<StoredUpload> = None;
    let result = collect_fields(&mut multipart, upload_dir, &mut image)
        .await
        .and_then(from_fields::<T>);

    match result {
        Ok(input) => Ok(ProjectForm { input, image }),
        Err(err) => {
            if let Some(upload) = &image {
                discard_upload(upload_dir, upload).await;
            }
            Err(err)
        }
    }
}

async fn collect_fields(
    multipart: &mut Multipart,
    upload_dir: &Path,
    image: &mut Option<StoredUpload>,
) -> AppResult<Map<String, Value>> {
    let mut fields = Map::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::from_body_rejection(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(str::to_string);

        if let Some(original) = file_name {
            if name != IMAGE_FIELD {
                // Unknown file fields are ignored.
                continue;
            }
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::from_body_rejection(e.status(), e.body_text()))?;
            // Browsers send an empty part when no file was chosen.
            if original.is_empty() && data.is_empty() {
                continue;
            }
            if image.is_some() {
                return Err(AppError::BadRequest(format!(
                    "Only one '{IMAGE_FIELD}' file is allowed"
                )));
            }
            *image = Some(store_image(upload_dir, &original, &data).await?);
        } else {
            // Plain text parts, including one named `image`, are form fields.
            let text = field
                .text()
                .await
                .map_err(|e| AppError::from_body_rejection(e.status(), e.body_text()))?;
            fields.insert(name, Value::String(text));
        }
    }

    Ok(fields)
}

fn from_fields<T: DeserializeOwned>(fields: Map<String, Value>) -> AppResult<T> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::BadRequest(format!("Invalid form fields: {e}")))
}

/// Write an uploaded image under a generated name.
pub async fn store_image(
    upload_dir: &Path,
    original_name: &str,
    data: &[u8],
) -> AppResult<StoredUpload> {
    let ext = image_extension(original_name)?;
    let filename = generate_stored_filename(&ext);
    let dest = upload_dir.join(&filename);

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    tokio::fs::write(&dest, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    tracing::debug!(filename = %filename, bytes = data.len(), "Stored uploaded image");
    Ok(StoredUpload { filename })
}

/// Resolve a record's `/uploads/<filename>` path to the file on disk.
pub fn resolve_image_path(upload_dir: &Path, image_path: &str) -> Option<PathBuf> {
    stored_filename(image_path).map(|name| upload_dir.join(name))
}

/// Remove the file behind a record's image path.
///
/// A file that is already gone is not an error. Paths outside the upload
/// directory are skipped.
pub async fn remove_image(upload_dir: &Path, image_path: &str) -> std::io::Result<()> {
    let Some(path) = resolve_image_path(upload_dir, image_path) else {
        tracing::warn!(image = %image_path, "Image path outside upload directory, not removing");
        return Ok(());
    };
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Removed image");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Best-effort removal of a freshly stored upload whose request failed.
pub async fn discard_upload(upload_dir: &Path, upload: &StoredUpload) {
    let path = upload_dir.join(&upload.filename);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        if e.kind() != ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to discard upload");
        }
    }
}
