#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use doc_store::{DocumentStore, MemoryStore, Snapshot, StoreConfig};
use social_service::models::{self, UserProfile};

pub fn store() -> Arc<dyn DocumentStore> {
    store_with_batch_limit(500)
}

pub fn store_with_batch_limit(limit: usize) -> Arc<dyn DocumentStore> {
    Arc::new(MemoryStore::new(StoreConfig {
        max_batch_size: limit,
        event_capacity: 1024,
    }))
}

pub async fn seed_user(store: &Arc<dyn DocumentStore>, uid: &str, display_name: &str) {
    seed_user_with_followers(store, uid, display_name, &[]).await;
}

pub async fn seed_user_with_followers(
    store: &Arc<dyn DocumentStore>,
    uid: &str,
    display_name: &str,
    followers: &[&str],
) {
    let profile = UserProfile {
        display_name: display_name.to_string(),
        photo_url: String::new(),
        followers: followers.iter().map(|f| f.to_string()).collect(),
        following: Vec::new(),
    };
    store
        .set(&models::user_path(uid), profile.write_data())
        .await
        .unwrap();
}

pub async fn profile(store: &Arc<dyn DocumentStore>, uid: &str) -> UserProfile {
    store
        .get(&models::user_path(uid))
        .await
        .unwrap()
        .unwrap()
        .decode()
        .unwrap()
}

pub async fn inbox(store: &Arc<dyn DocumentStore>, uid: &str) -> Vec<Snapshot> {
    store.list(&models::inbox_collection(uid)).await.unwrap()
}

/// Poll a condition until it holds or a two-second budget runs out.
pub async fn wait_until<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
