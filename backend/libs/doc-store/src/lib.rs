//! Document store client
//!
//! Typed accessor over a document database: get/list of documents, field
//! operations (array-union, array-remove, server-assigned timestamps), and
//! atomic multi-document batched writes with a bounded batch size.
//!
//! The [`DocumentStore`] trait is the seam services program against; the
//! process-wide backend is shared behind an `Arc` with no explicit teardown.
//! [`MemoryStore`] is the in-process backend used by the service binary and
//! the test suites.

mod error;
mod memory;
mod path;
mod snapshot;
mod store;
mod write;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use path::DocPath;
pub use snapshot::{DocEvent, EventKind, Snapshot};
pub use store::{DocumentStore, StoreConfig};
pub use write::{DocData, FieldWrite, WriteBatch, WriteOp};

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
