//! Uploaded image naming and public path mapping.
//!
//! Stored images are referenced from records by their public path
//! `/uploads/<filename>`; the file itself lives directly inside the upload
//! directory.

use crate::error::CoreError;

/// Public path prefix under which the upload directory is served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Multipart field carrying the image file.
pub const IMAGE_FIELD: &str = "image";

/// Accepted image extensions (lowercase).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "gif", "webp", "svg", "avif"];

/// Public path for a stored upload, e.g. `/uploads/123-abc.png`.
pub fn public_path(stored_filename: &str) -> String {
    format!("{UPLOADS_PREFIX}/{stored_filename}")
}

/// Recover the stored filename from a record's image path.
///
/// Returns `None` for paths outside the upload prefix or anything that could
/// escape the upload directory.
pub fn stored_filename(image_path: &str) -> Option<&str> {
    let name = image_path.strip_prefix(UPLOADS_PREFIX)?.strip_prefix('/')?;
    let escapes = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    (!escapes).then_some(name)
}

/// Extract and validate the lowercase extension of a client-supplied filename.
pub fn image_extension(original_name: &str) -> Result<String, CoreError> {
    let ext = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(CoreError::Validation(format!(
            "Unsupported image format '{original_name}'. Supported: {}",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        )))
    }
}

/// Generate the stored filename for a new upload.
///
/// Convention: `{unix_millis}-{uuid_simple}.{ext}`.
pub fn generate_stored_filename(ext: &str) -> String {
    format!(
        "{}-{}.{ext}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    )
}
