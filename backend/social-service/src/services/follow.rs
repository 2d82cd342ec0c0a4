use std::sync::Arc;

use doc_store::{DocData, DocumentStore, WriteBatch};
use serde_json::json;
use tracing::info;

use crate::error::{AppError, ServiceResult};
use crate::metrics;
use crate::models::{self, Notification, UserProfile};

#[derive(Clone)]
pub struct FollowService {
    store: Arc<dyn DocumentStore>,
}

impl FollowService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Toggle the follow relationship from `caller_uid` to `target_uid`;
    /// returns the state after the toggle.
    ///
    /// Both sides of the relationship change in one atomic batch. A
    /// not-following → following transition also enqueues a follow
    /// notification for the target inside the same batch; unfollow never
    /// notifies.
    pub async fn toggle(&self, caller_uid: &str, target_uid: &str) -> ServiceResult<bool> {
        if caller_uid.is_empty() || target_uid.is_empty() {
            return Err(AppError::InvalidArgument(
                "caller and target uid are required".to_string(),
            ));
        }
        if caller_uid == target_uid {
            return Err(AppError::InvalidArgument(
                "cannot follow yourself".to_string(),
            ));
        }

        let me_path = models::user_path(caller_uid);
        let them_path = models::user_path(target_uid);
        let me: UserProfile = self
            .store
            .get(&me_path)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {caller_uid}")))?
            .decode()?;

        let is_following = me.is_following(target_uid);

        let mut batch = WriteBatch::new();
        if is_following {
            batch.update(
                me_path,
                DocData::new().array_remove("following", vec![json!(target_uid)]),
            );
            batch.update(
                them_path,
                DocData::new().array_remove("followers", vec![json!(caller_uid)]),
            );
        } else {
            batch.update(
                me_path,
                DocData::new().array_union("following", vec![json!(target_uid)]),
            );
            batch.update(
                them_path,
                DocData::new().array_union("followers", vec![json!(caller_uid)]),
            );
            let notification = Notification::follow(caller_uid, &me);
            batch.set(
                models::notification_path(target_uid, &self.store.new_id()),
                notification.write_data(),
            );
        }
        self.store.commit(batch).await?;

        if !is_following {
            metrics::observe_notifications("follow", 1);
        }
        info!(
            caller = caller_uid,
            target = target_uid,
            following = !is_following,
            "follow toggled"
        );
        Ok(!is_following)
    }
}
