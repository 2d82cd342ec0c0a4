use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::path::DocPath;
use crate::snapshot::{DocEvent, EventKind, Snapshot};
use crate::store::{DocumentStore, StoreConfig};
use crate::write::{DocData, FieldWrite, WriteBatch, WriteOp};

/// In-process document store backend.
///
/// Documents live in a path-keyed map behind a `tokio::sync::RwLock`; a
/// commit validates the whole batch before mutating anything, so a failed
/// commit leaves the map untouched. Committed writes are published on a
/// broadcast change feed after the lock is released. Server-assigned
/// timestamps are strictly monotonic across commits.
pub struct MemoryStore {
    docs: RwLock<BTreeMap<String, Value>>,
    events: broadcast::Sender<DocEvent>,
    clock: Mutex<DateTime<Utc>>,
    max_batch_size: usize,
}

impl MemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity);
        Self {
            docs: RwLock::new(BTreeMap::new()),
            events,
            clock: Mutex::new(Utc::now()),
            max_batch_size: config.max_batch_size,
        }
    }

    async fn next_timestamp(&self) -> DateTime<Utc> {
        let mut last = self.clock.lock().await;
        let mut now = Utc::now();
        if now <= *last {
            now = *last + Duration::milliseconds(1);
        }
        *last = now;
        now
    }

    fn apply_fields(target: &mut Map<String, Value>, data: &DocData, now: DateTime<Utc>) {
        for (name, write) in data.fields() {
            match write {
                FieldWrite::Value(value) => {
                    target.insert(name.clone(), value.clone());
                }
                FieldWrite::ServerTimestamp => {
                    target.insert(name.clone(), Value::String(now.to_rfc3339()));
                }
                FieldWrite::ArrayUnion(values) => {
                    let mut array = match target.get(name) {
                        Some(Value::Array(existing)) => existing.clone(),
                        _ => Vec::new(),
                    };
                    for value in values {
                        if !array.contains(value) {
                            array.push(value.clone());
                        }
                    }
                    target.insert(name.clone(), Value::Array(array));
                }
                FieldWrite::ArrayRemove(values) => {
                    let mut array = match target.get(name) {
                        Some(Value::Array(existing)) => existing.clone(),
                        _ => Vec::new(),
                    };
                    array.retain(|value| !values.contains(value));
                    target.insert(name.clone(), Value::Array(array));
                }
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocPath) -> Result<Option<Snapshot>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .get(&path.to_string())
            .map(|data| Snapshot::new(path.clone(), data.clone())))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Snapshot>, StoreError> {
        let prefix = format!("{}/", collection);
        let docs = self.docs.read().await;
        let snapshots = docs
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter(|(key, _)| !key[prefix.len()..].contains('/'))
            .map(|(key, data)| {
                Snapshot::new(DocPath::new(collection, &key[prefix.len()..]), data.clone())
            })
            .collect();
        Ok(snapshots)
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), StoreError> {
        let size = batch.len();
        if size > self.max_batch_size {
            return Err(StoreError::BatchTooLarge {
                size,
                limit: self.max_batch_size,
            });
        }
        if batch.is_empty() {
            return Ok(());
        }

        let now = self.next_timestamp().await;
        let mut docs = self.docs.write().await;

        // Validate the whole batch before touching the map: an update may
        // only target a document that exists or is created earlier in the
        // same batch.
        let mut pending: HashSet<String> = HashSet::new();
        for op in batch.ops() {
            match op {
                WriteOp::Set { path, .. } => {
                    pending.insert(path.to_string());
                }
                WriteOp::Update { path, .. } => {
                    let key = path.to_string();
                    if !docs.contains_key(&key) && !pending.contains(&key) {
                        return Err(StoreError::NotFound(key));
                    }
                }
            }
        }

        let mut events = Vec::with_capacity(size);
        for op in batch.into_ops() {
            match op {
                WriteOp::Set { path, data } => {
                    let key = path.to_string();
                    let kind = if docs.contains_key(&key) {
                        EventKind::Updated
                    } else {
                        EventKind::Created
                    };
                    let mut fields = Map::new();
                    Self::apply_fields(&mut fields, &data, now);
                    let value = Value::Object(fields);
                    docs.insert(key, value.clone());
                    events.push(DocEvent {
                        kind,
                        snapshot: Snapshot::new(path, value),
                    });
                }
                WriteOp::Update { path, data } => {
                    let key = path.to_string();
                    if let Some(Value::Object(fields)) = docs.get_mut(&key) {
                        Self::apply_fields(fields, &data, now);
                        let value = Value::Object(fields.clone());
                        events.push(DocEvent {
                            kind: EventKind::Updated,
                            snapshot: Snapshot::new(path, value),
                        });
                    }
                }
            }
        }
        drop(docs);

        debug!(ops = size, "committed write batch");
        for event in events {
            // No receivers is fine; the feed is advisory.
            let _ = self.events.send(event);
        }
        Ok(())
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    fn new_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    fn watch(&self) -> broadcast::Receiver<DocEvent> {
        self.events.subscribe()
    }
}
