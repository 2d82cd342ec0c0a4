use std::sync::Arc;

use doc_store::{DocData, DocumentStore};
use serde_json::json;
use tracing::{info, warn};

use crate::error::{AppError, ServiceResult};
use crate::metrics;
use crate::models::{self, Notification, Post, UserProfile};

#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn DocumentStore>,
}

impl LikeService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Toggle the caller's membership in a post's liker set; returns the
    /// state after the toggle.
    ///
    /// The membership update is a single atomic field operation and is the
    /// authoritative effect. A not-liked → liked transition on someone
    /// else's post also enqueues a like notification for the author as a
    /// separate, best-effort write; self-likes never notify.
    pub async fn toggle(&self, caller_uid: &str, post_id: &str) -> ServiceResult<bool> {
        if caller_uid.is_empty() || post_id.is_empty() {
            return Err(AppError::InvalidArgument(
                "caller uid and post id are required".to_string(),
            ));
        }

        let post_path = models::post_path(post_id);
        let post: Post = self
            .store
            .get(&post_path)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {post_id}")))?
            .decode()?;

        let has_liked = post.is_liked_by(caller_uid);
        let membership = if has_liked {
            DocData::new().array_remove("likedBy", vec![json!(caller_uid)])
        } else {
            DocData::new().array_union("likedBy", vec![json!(caller_uid)])
        };
        self.store.update(&post_path, membership).await?;

        if !has_liked && post.author_id != caller_uid {
            // The like itself is durable at this point; notification
            // delivery is an advisory side channel.
            if let Err(err) = self.notify_author(caller_uid, post_id, &post.author_id).await {
                warn!(post = post_id, error = %err, "like notification not delivered");
            }
        }

        info!(caller = caller_uid, post = post_id, liked = !has_liked, "like toggled");
        Ok(!has_liked)
    }

    async fn notify_author(
        &self,
        caller_uid: &str,
        post_id: &str,
        author_uid: &str,
    ) -> ServiceResult<()> {
        let actor: UserProfile = self
            .store
            .get(&models::user_path(caller_uid))
            .await?
            .map(|snapshot| snapshot.decode())
            .transpose()?
            .unwrap_or_default();

        let notification = Notification::like(post_id, &actor);
        self.store
            .set(
                &models::notification_path(author_uid, &self.store.new_id()),
                notification.write_data(),
            )
            .await?;
        metrics::observe_notifications("like", 1);
        Ok(())
    }
}
