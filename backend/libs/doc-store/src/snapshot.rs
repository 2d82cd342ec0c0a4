use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::StoreError;
use crate::path::DocPath;

/// A read document: its address plus the field data at read time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    path: DocPath,
    data: Value,
}

impl Snapshot {
    pub fn new(path: DocPath, data: Value) -> Self {
        Self { path, data }
    }

    pub fn path(&self) -> &DocPath {
        &self.path
    }

    pub fn id(&self) -> &str {
        self.path.id()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Deserialize the document into a typed model.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        serde_json::from_value(self.data.clone()).map_err(|source| StoreError::Decode {
            path: self.path.to_string(),
            source,
        })
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(Value::as_str)
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.data.get(name).and_then(Value::as_bool)
    }

    /// String-array field, empty when absent or not an array.
    pub fn str_array(&self, name: &str) -> Vec<String> {
        self.data
            .get(name)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Kind of change carried by a [`DocEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Created,
    Updated,
}

/// A committed write, published on the store's change feed.
#[derive(Debug, Clone)]
pub struct DocEvent {
    pub kind: EventKind,
    pub snapshot: Snapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> Snapshot {
        Snapshot::new(
            DocPath::new("users", "alice"),
            json!({
                "displayName": "Alice",
                "followers": ["bob", "carol"],
                "read": false,
            }),
        )
    }

    #[test]
    fn test_typed_accessors() {
        let snap = snapshot();
        assert_eq!(snap.id(), "alice");
        assert_eq!(snap.str_field("displayName"), Some("Alice"));
        assert_eq!(snap.bool_field("read"), Some(false));
        assert_eq!(snap.str_array("followers"), vec!["bob", "carol"]);
        assert!(snap.str_array("following").is_empty());
    }

    #[test]
    fn test_decode_failure_names_the_document() {
        #[derive(Debug, serde::Deserialize)]
        struct Strict {
            #[allow(dead_code)]
            missing: u64,
        }

        let err = snapshot().decode::<Strict>().unwrap_err();
        assert!(err.to_string().contains("users/alice"));
    }
}
