use std::sync::Arc;

use doc_store::DocumentStore;
use tracing::{info, warn};

use crate::error::{AppError, ServiceResult};
use crate::models::{self, Notification, Post, UserProfile};
use crate::services::Fanout;

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn DocumentStore>,
    fanout: Fanout,
}

impl PostService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            fanout: Fanout::new(store.clone()),
            store,
        }
    }

    /// Create a post and fan a notification out to the author's followers;
    /// returns the new post id.
    ///
    /// The post is durable once its own write succeeds; fan-out is
    /// best-effort and never rolls the post back. The `notified` marker is
    /// written with the post itself, so the post-created worker treats
    /// callable-created posts as already handled and only posts reaching
    /// the store by other paths fall back to it.
    pub async fn create(
        &self,
        caller_uid: &str,
        content: &str,
        image_url: &str,
    ) -> ServiceResult<String> {
        if caller_uid.is_empty() {
            return Err(AppError::InvalidArgument("caller uid is required".to_string()));
        }
        if content.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "content must not be empty".to_string(),
            ));
        }

        let post_id = self.store.new_id();
        self.store
            .set(
                &models::post_path(&post_id),
                Post::write_data(caller_uid, content, image_url, true),
            )
            .await?;
        info!(post = %post_id, author = caller_uid, "post created");

        match self.author_profile(caller_uid).await {
            Ok(Some(author)) if !author.followers.is_empty() => {
                let notification = Notification::new_post(&post_id, &author);
                let report = self.fanout.notify_all(&author.followers, &notification).await;
                if !report.complete() {
                    warn!(
                        post = %post_id,
                        failed_groups = report.failed_groups,
                        groups = report.groups,
                        "post fan-out incomplete"
                    );
                }
            }
            Ok(_) => {}
            Err(err) => {
                warn!(post = %post_id, error = %err, "author profile unavailable; fan-out skipped");
            }
        }

        Ok(post_id)
    }

    async fn author_profile(&self, uid: &str) -> ServiceResult<Option<UserProfile>> {
        Ok(self
            .store
            .get(&models::user_path(uid))
            .await?
            .map(|snapshot| snapshot.decode())
            .transpose()?)
    }
}
