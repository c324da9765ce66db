use std::path::PathBuf;

/// Errors raised by a [`RecordStore`](crate::RecordStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading, writing or creating the document failed.
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but is not a JSON array of records.
    #[error("Corrupt document {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The records could not be serialized.
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
