use std::sync::Arc;

use doc_store::{DocData, DocEvent, DocumentStore, EventKind, Snapshot};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::models::{self, Notification, Post, UserProfile};
use crate::services::Fanout;

/// PostCreatedWorker: reacts to post documents inserted by any path.
///
/// Posts created through the callable operation carry the `notified` marker
/// and are skipped, so this is a genuine fallback for administrative or
/// migrated writes that bypass it. Fan-out here runs with no caller to
/// answer to: every error is logged and swallowed.
pub struct PostCreatedWorker {
    store: Arc<dyn DocumentStore>,
    fanout: Fanout,
    feed: broadcast::Receiver<DocEvent>,
}

impl PostCreatedWorker {
    /// Subscribes to the change feed immediately, so posts inserted after
    /// construction are observed even if `run` starts later.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            fanout: Fanout::new(store.clone()),
            feed: store.watch(),
            store,
        }
    }

    /// Consume the store change feed until it closes.
    pub async fn run(mut self) {
        info!("Starting post-created worker");
        loop {
            match self.feed.recv().await {
                Ok(event) => {
                    if event.kind != EventKind::Created
                        || event.snapshot.path().collection() != models::POSTS_COLLECTION
                    {
                        continue;
                    }
                    if let Err(err) = self.handle_created(&event.snapshot).await {
                        error!(post = event.snapshot.id(), error = %err, "fallback fan-out failed");
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "change feed lagged; some posts may miss fallback fan-out");
                }
                Err(RecvError::Closed) => break,
            }
        }
        info!("Post-created worker stopped");
    }

    async fn handle_created(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let post: Post = snapshot.decode()?;
        if post.notified {
            debug!(post = snapshot.id(), "already fanned out by its creator");
            return Ok(());
        }

        let author = match self.store.get(&models::user_path(&post.author_id)).await? {
            Some(author_snapshot) => author_snapshot.decode::<UserProfile>()?,
            None => {
                debug!(post = snapshot.id(), author = %post.author_id, "author has no user document");
                return Ok(());
            }
        };
        if author.followers.is_empty() {
            return Ok(());
        }

        let notification = Notification::new_post(snapshot.id(), &author);
        let report = self.fanout.notify_all(&author.followers, &notification).await;
        if !report.complete() {
            warn!(
                post = snapshot.id(),
                failed_groups = report.failed_groups,
                groups = report.groups,
                "fallback fan-out incomplete"
            );
        }

        self.store
            .update(snapshot.path(), DocData::new().field("notified", true))
            .await?;
        Ok(())
    }
}
