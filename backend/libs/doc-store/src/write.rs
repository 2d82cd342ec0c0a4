use serde_json::Value;

use crate::path::DocPath;

/// A single field mutation inside a document write.
///
/// `ArrayUnion` and `ArrayRemove` are commutative and idempotent set
/// operations over array fields; `ServerTimestamp` is resolved by the
/// backend at commit time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    Value(Value),
    ServerTimestamp,
    ArrayUnion(Vec<Value>),
    ArrayRemove(Vec<Value>),
}

/// Ordered set of field writes for one document.
#[derive(Debug, Clone, Default)]
pub struct DocData {
    fields: Vec<(String, FieldWrite)>,
}

impl DocData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), FieldWrite::Value(value.into())));
        self
    }

    /// Field assigned the backend's timestamp at commit time.
    pub fn server_timestamp(mut self, name: impl Into<String>) -> Self {
        self.fields.push((name.into(), FieldWrite::ServerTimestamp));
        self
    }

    /// Append the given elements to an array field, skipping ones already
    /// present.
    pub fn array_union(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.fields.push((name.into(), FieldWrite::ArrayUnion(values)));
        self
    }

    /// Remove all occurrences of the given elements from an array field.
    pub fn array_remove(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.fields.push((name.into(), FieldWrite::ArrayRemove(values)));
        self
    }

    pub fn fields(&self) -> &[(String, FieldWrite)] {
        &self.fields
    }
}

/// One operation inside a write batch.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Replace (or create) the document at `path`.
    Set { path: DocPath, data: DocData },
    /// Merge field writes into an existing document; the commit fails if the
    /// document is absent.
    Update { path: DocPath, data: DocData },
}

/// An atomic multi-document write.
///
/// All operations commit together or not at all. Backends bound the number
/// of operations per commit; see [`crate::DocumentStore::max_batch_size`].
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, path: DocPath, data: DocData) -> &mut Self {
        self.ops.push(WriteOp::Set { path, data });
        self
    }

    pub fn update(&mut self, path: DocPath, data: DocData) -> &mut Self {
        self.ops.push(WriteOp::Update { path, data });
        self
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}
