use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::error::StoreError;
use crate::models::project::ProjectRecord;

/// In-memory record store, used as a test double for the service layer.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ProjectRecord>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn with_records(records: Vec<ProjectRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Self::default()
        }
    }

    /// Make subsequent `save_all` calls fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent `load_all` and `health_check` calls fail.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Current contents, bypassing failure injection.
    pub async fn snapshot(&self) -> Vec<ProjectRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        Ok(self.records.read().await.clone())
    }

    async fn save_all(&self, records: &[ProjectRecord]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".into()));
        }
        *self.records.write().await = records.to_vec();
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("reads disabled".into()));
        }
        Ok(())
    }
}
