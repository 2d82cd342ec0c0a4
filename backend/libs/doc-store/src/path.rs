use std::fmt;

/// Address of a single document: a collection plus a document id.
///
/// The collection component may itself be a nested path, so sub-collections
/// are addressed the same way as top-level ones
/// (`users/alice/notifications` + id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    collection: String,
    id: String,
}

impl DocPath {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Collection path nested under this document.
    pub fn sub_collection(&self, name: &str) -> String {
        format!("{}/{}/{}", self.collection, self.id, name)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_collection_and_id() {
        let path = DocPath::new("users", "alice");
        assert_eq!(path.to_string(), "users/alice");
    }

    #[test]
    fn test_sub_collection_nesting() {
        let user = DocPath::new("users", "alice");
        let inbox = user.sub_collection("notifications");
        assert_eq!(inbox, "users/alice/notifications");

        let notif = DocPath::new(inbox, "n1");
        assert_eq!(notif.to_string(), "users/alice/notifications/n1");
        assert_eq!(notif.collection(), "users/alice/notifications");
        assert_eq!(notif.id(), "n1");
    }
}
