use std::sync::Arc;

use doc_store::{DocData, DocumentStore};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::ServiceResult;
use crate::models::{self, Notification};

/// Fixed inbox page size.
pub const INBOX_LIMIT: usize = 50;

/// One inbox document: the notification plus its store-assigned id.
#[derive(Debug, Clone, Serialize)]
pub struct InboxEntry {
    pub id: String,
    #[serde(flatten)]
    pub notification: Notification,
}

/// Lazy, infinite sequence of inbox snapshots for one user.
///
/// The subscriber owns its own derived state (unread badges, rendering);
/// the sequence ends when the subscription is dropped or the store closes,
/// and re-subscribing restarts from a fresh initial snapshot.
pub struct InboxSubscription {
    rx: mpsc::UnboundedReceiver<Vec<InboxEntry>>,
}

impl InboxSubscription {
    /// Next inbox snapshot; `None` once the feed has closed.
    pub async fn next_snapshot(&mut self) -> Option<Vec<InboxEntry>> {
        self.rx.recv().await
    }
}

#[derive(Clone)]
pub struct InboxService {
    store: Arc<dyn DocumentStore>,
}

impl InboxService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// The owner's notifications, newest first, bounded at [`INBOX_LIMIT`].
    pub async fn list(&self, uid: &str) -> ServiceResult<Vec<InboxEntry>> {
        let mut entries = Vec::new();
        for snapshot in self.store.list(&models::inbox_collection(uid)).await? {
            match snapshot.decode::<Notification>() {
                Ok(notification) => entries.push(InboxEntry {
                    id: snapshot.id().to_string(),
                    notification,
                }),
                Err(err) => {
                    warn!(id = snapshot.id(), error = %err, "skipping malformed notification");
                }
            }
        }
        entries.sort_by(|a, b| b.notification.timestamp.cmp(&a.notification.timestamp));
        entries.truncate(INBOX_LIMIT);
        Ok(entries)
    }

    /// Count of unread notifications across the whole inbox.
    pub async fn unread_count(&self, uid: &str) -> ServiceResult<usize> {
        let snapshots = self.store.list(&models::inbox_collection(uid)).await?;
        Ok(snapshots
            .iter()
            .filter(|snapshot| snapshot.bool_field("read") == Some(false))
            .count())
    }

    /// Mark one notification as read; the only mutation an inbox document
    /// ever receives.
    pub async fn mark_read(&self, uid: &str, notification_id: &str) -> ServiceResult<()> {
        self.store
            .update(
                &models::notification_path(uid, notification_id),
                DocData::new().field("read", true),
            )
            .await?;
        Ok(())
    }

    /// Subscribe to the owner's inbox: an immediate snapshot, then a fresh
    /// snapshot after every change beneath the inbox.
    pub async fn subscribe(&self, uid: &str) -> ServiceResult<InboxSubscription> {
        let mut feed = self.store.watch();
        let (tx, rx) = mpsc::unbounded_channel();

        let initial = self.list(uid).await?;
        let _ = tx.send(initial);

        let service = self.clone();
        let inbox = models::inbox_collection(uid);
        let uid = uid.to_string();
        tokio::spawn(async move {
            loop {
                let relevant = match feed.recv().await {
                    Ok(event) => event.snapshot.path().collection() == inbox,
                    // A lagged feed may have dropped inbox changes, so
                    // resnapshot rather than skip.
                    Err(RecvError::Lagged(missed)) => {
                        warn!(missed, uid = %uid, "inbox feed lagged");
                        true
                    }
                    Err(RecvError::Closed) => break,
                };
                if !relevant {
                    continue;
                }
                match service.list(&uid).await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break; // subscriber dropped
                        }
                    }
                    Err(err) => warn!(uid = %uid, error = %err, "inbox snapshot failed"),
                }
            }
        });

        Ok(InboxSubscription { rx })
    }
}
