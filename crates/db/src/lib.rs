//! Record store for project records.
//!
//! The whole collection lives in one JSON document. [`RecordStore`] exposes
//! only load-all / save-all over that collection; every mutation rewrites
//! the entire document.

pub mod error;
pub mod models;
pub mod store;

pub use error::StoreError;
pub use store::{JsonFileStore, ReadPolicy, RecordStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MemoryStore;
