use std::sync::Arc;

use doc_store::DocumentStore;
use tracing::info;

use crate::error::{AppError, ServiceResult};
use crate::models::{self, UserProfile};

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn DocumentStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create the caller's user document with empty follow sets, as the
    /// sign-up flow does. Idempotent: an existing profile is returned
    /// untouched, so repeated sign-ins never reset follow state.
    pub async fn register(
        &self,
        uid: &str,
        display_name: &str,
        photo_url: &str,
    ) -> ServiceResult<UserProfile> {
        if uid.is_empty() {
            return Err(AppError::InvalidArgument("uid is required".to_string()));
        }
        if display_name.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "display name must not be empty".to_string(),
            ));
        }

        let path = models::user_path(uid);
        if let Some(existing) = self.store.get(&path).await? {
            return Ok(existing.decode()?);
        }

        let profile = UserProfile::new(display_name, photo_url);
        self.store.set(&path, profile.write_data()).await?;
        info!(uid, "profile created");
        Ok(profile)
    }

    pub async fn get(&self, uid: &str) -> ServiceResult<UserProfile> {
        if uid.is_empty() {
            return Err(AppError::InvalidArgument("uid is required".to_string()));
        }
        self.store
            .get(&models::user_path(uid))
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {uid}")))?
            .decode()
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_store::{DocData, MemoryStore};
    use serde_json::json;

    fn service() -> (ProfileService, Arc<dyn DocumentStore>) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::default());
        (ProfileService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_register_then_get() {
        let (profiles, _store) = service();
        profiles.register("alice", "Alice", "").await.unwrap();

        let profile = profiles.get("alice").await.unwrap();
        assert_eq!(profile.display_name, "Alice");
        assert!(profile.followers.is_empty());
        assert!(profile.following.is_empty());
    }

    #[tokio::test]
    async fn test_register_is_idempotent_and_preserves_follow_state() {
        let (profiles, store) = service();
        profiles.register("alice", "Alice", "").await.unwrap();
        store
            .update(
                &models::user_path("alice"),
                DocData::new().array_union("followers", vec![json!("bob")]),
            )
            .await
            .unwrap();

        let returned = profiles.register("alice", "Alice Again", "").await.unwrap();
        assert_eq!(returned.display_name, "Alice");
        assert_eq!(returned.followers, vec!["bob"]);
    }

    #[tokio::test]
    async fn test_get_missing_profile_is_not_found() {
        let (profiles, _store) = service();
        let err = profiles.get("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_blank_display_name() {
        let (profiles, _store) = service();
        let err = profiles.register("alice", "   ", "").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }
}
