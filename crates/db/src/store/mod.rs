//! The [`RecordStore`] boundary and its implementations.

mod json_file;
#[cfg(any(test, feature = "test-utils"))]
mod memory;

pub use json_file::JsonFileStore;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::project::ProjectRecord;

/// Persistence boundary over the full project collection.
///
/// There are no partial writes: callers load everything, mutate in memory
/// and save everything back. Implementations do not serialize writers;
/// two concurrent load/save sequences race and the last writer wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the full collection in insertion order.
    async fn load_all(&self) -> Result<Vec<ProjectRecord>, StoreError>;

    /// Replace the full collection.
    async fn save_all(&self, records: &[ProjectRecord]) -> Result<(), StoreError>;

    /// Check that the collection is readable, regardless of read policy.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// What `load_all` does when the document cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadPolicy {
    /// Log the failure and return an empty collection.
    #[default]
    FailOpen,
    /// Return the failure to the caller.
    FailClosed,
}

impl ReadPolicy {
    /// Parse from a config value (`fail-open` / `fail-closed`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "fail_open" | "open" => Some(Self::FailOpen),
            "fail-closed" | "fail_closed" | "closed" => Some(Self::FailClosed),
            _ => None,
        }
    }

    /// Config name of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FailOpen => "fail-open",
            Self::FailClosed => "fail-closed",
        }
    }

    /// Apply the policy to a load result.
    pub(crate) fn resolve(
        self,
        result: Result<Vec<ProjectRecord>, StoreError>,
    ) -> Result<Vec<ProjectRecord>, StoreError> {
        match (self, result) {
            (_, Ok(records)) => Ok(records),
            (Self::FailOpen, Err(e)) => {
                tracing::warn!(error = %e, "Failed to read records, serving empty collection");
                Ok(Vec::new())
            }
            (Self::FailClosed, Err(e)) => Err(e),
        }
    }
}
