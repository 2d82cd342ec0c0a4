use std::sync::Arc;

use doc_store::{DocumentStore, WriteBatch};
use futures::future::join_all;
use tracing::warn;

use crate::metrics;
use crate::models::{self, Notification};

/// Outcome of one fan-out run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanoutReport {
    /// Recipients addressed.
    pub recipients: usize,
    /// Batch groups the recipients were partitioned into.
    pub groups: usize,
    /// Groups whose commit failed; their recipients received nothing.
    pub failed_groups: usize,
}

impl FanoutReport {
    pub fn complete(&self) -> bool {
        self.failed_groups == 0
    }
}

/// Shared notification fan-out: writes one copy of a notification into each
/// recipient's inbox.
///
/// Recipients are partitioned into consecutive groups no larger than the
/// store's batch ceiling; each group commits as one atomic batch and all
/// group commits run concurrently, awaited together. A failed group never
/// affects the others — fan-out is at-least-once per group, not globally
/// atomic, which is acceptable for an advisory side channel.
#[derive(Clone)]
pub struct Fanout {
    store: Arc<dyn DocumentStore>,
}

impl Fanout {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn notify_all(
        &self,
        recipients: &[String],
        notification: &Notification,
    ) -> FanoutReport {
        if recipients.is_empty() {
            return FanoutReport {
                recipients: 0,
                groups: 0,
                failed_groups: 0,
            };
        }

        let limit = self.store.max_batch_size().max(1);
        let mut group_sizes = Vec::new();
        let mut commits = Vec::new();
        for group in recipients.chunks(limit) {
            let mut batch = WriteBatch::new();
            for uid in group {
                let path = models::notification_path(uid, &self.store.new_id());
                batch.set(path, notification.write_data());
            }
            group_sizes.push(group.len());
            commits.push(self.store.commit(batch));
        }

        let groups = commits.len();
        let results = join_all(commits).await;

        let mut failed_groups = 0;
        let mut delivered: u64 = 0;
        for (index, result) in results.iter().enumerate() {
            match result {
                Ok(()) => {
                    delivered += group_sizes[index] as u64;
                    metrics::observe_fanout_batch("committed");
                }
                Err(err) => {
                    failed_groups += 1;
                    metrics::observe_fanout_batch("failed");
                    warn!(group = index, error = %err, "fan-out batch commit failed");
                }
            }
        }
        metrics::observe_notifications(notification.kind.as_str(), delivered);

        FanoutReport {
            recipients: recipients.len(),
            groups,
            failed_groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use doc_store::{MemoryStore, StoreConfig};

    fn fanout_with_limit(limit: usize) -> (Fanout, Arc<dyn DocumentStore>) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new(StoreConfig {
            max_batch_size: limit,
            event_capacity: 16,
        }));
        (Fanout::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_partitions_by_store_batch_ceiling() {
        let (fanout, store) = fanout_with_limit(2);
        let recipients: Vec<String> = (0..5).map(|i| format!("u{i}")).collect();
        let notification = Notification::new_post("p1", &UserProfile::new("Alice", ""));

        let report = fanout.notify_all(&recipients, &notification).await;
        assert_eq!(report.recipients, 5);
        assert_eq!(report.groups, 3); // 2 + 2 + 1
        assert!(report.complete());

        for uid in &recipients {
            let inbox = store.list(&models::inbox_collection(uid)).await.unwrap();
            assert_eq!(inbox.len(), 1);
            assert_eq!(inbox[0].str_field("type"), Some("post"));
        }
    }

    #[tokio::test]
    async fn test_no_recipients_is_a_no_op() {
        let (fanout, _store) = fanout_with_limit(2);
        let notification = Notification::new_post("p1", &UserProfile::new("Alice", ""));

        let report = fanout.notify_all(&[], &notification).await;
        assert_eq!(report.groups, 0);
        assert!(report.complete());
    }
}
