use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::StoreError;
use crate::path::DocPath;
use crate::snapshot::{DocEvent, Snapshot};
use crate::write::{DocData, WriteBatch};

/// Backend configuration.
///
/// `max_batch_size` is the backend's per-commit write ceiling; it is a
/// property of the chosen backend, injected rather than hardcoded at call
/// sites.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum operations per atomic commit.
    pub max_batch_size: usize,
    /// Buffered capacity of the change feed.
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 500,
            event_capacity: 256,
        }
    }
}

/// Contract of the document database.
///
/// Implementations are process-wide shared resources: cheap to share behind
/// an `Arc`, safe for concurrent callers, with no explicit teardown.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document; `None` when absent.
    async fn get(&self, path: &DocPath) -> Result<Option<Snapshot>, StoreError>;

    /// Read the direct documents of a collection.
    async fn list(&self, collection: &str) -> Result<Vec<Snapshot>, StoreError>;

    /// Commit a batch atomically: every operation applies, or none does.
    ///
    /// Fails with [`StoreError::BatchTooLarge`] past `max_batch_size`, and
    /// with [`StoreError::NotFound`] when an update targets a missing
    /// document.
    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError>;

    /// Per-commit write ceiling of this backend.
    fn max_batch_size(&self) -> usize;

    /// Fresh backend-assigned document id.
    fn new_id(&self) -> String;

    /// Subscribe to the change feed of committed writes.
    fn watch(&self) -> broadcast::Receiver<DocEvent>;

    /// Replace (or create) a single document.
    async fn set(&self, path: &DocPath, data: DocData) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.set(path.clone(), data);
        self.commit(batch).await
    }

    /// Merge field writes into a single existing document.
    async fn update(&self, path: &DocPath, data: DocData) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.update(path.clone(), data);
        self.commit(batch).await
    }
}
