mod common;

use common::{inbox, seed_user_with_followers, store, store_with_batch_limit, wait_until};
use doc_store::DocumentStore;
use social_service::error::AppError;
use social_service::models::{self, Notification, Post, UserProfile};
use social_service::services::{Fanout, PostService};
use social_service::workers::PostCreatedWorker;

#[tokio::test]
async fn test_create_post_with_empty_content_creates_nothing() {
    let store = store();
    seed_user_with_followers(&store, "alice", "Alice", &["f1"]).await;
    let posts = PostService::new(store.clone());

    let err = posts.create("alice", "   ", "").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));

    assert!(store.list(models::POSTS_COLLECTION).await.unwrap().is_empty());
    assert!(inbox(&store, "f1").await.is_empty());
}

#[tokio::test]
async fn test_create_post_notifies_every_follower() {
    let store = store();
    let followers = ["f1", "f2", "f3"];
    seed_user_with_followers(&store, "alice", "Alice", &followers).await;
    let posts = PostService::new(store.clone());

    let post_id = posts.create("alice", "hello world", "https://img").await.unwrap();

    let all_posts = store.list(models::POSTS_COLLECTION).await.unwrap();
    assert_eq!(all_posts.len(), 1);
    let post: Post = all_posts[0].decode().unwrap();
    assert_eq!(post.author_id, "alice");
    assert_eq!(post.content, "hello world");
    assert_eq!(post.image_url, "https://img");
    assert!(post.liked_by.is_empty());
    assert!(post.timestamp.is_some());
    assert!(post.notified);

    for follower in followers {
        let entries = inbox(&store, follower).await;
        assert_eq!(entries.len(), 1, "follower {follower} should have one notification");
        assert_eq!(entries[0].str_field("type"), Some("post"));
        assert_eq!(entries[0].str_field("postId"), Some(post_id.as_str()));
        assert_eq!(
            entries[0].str_field("desc"),
            Some("Alice published a new post.")
        );
        assert_eq!(entries[0].str_field("actionURL"), Some(format!("/post/{post_id}").as_str()));
    }
    assert!(inbox(&store, "alice").await.is_empty());
}

#[tokio::test]
async fn test_create_post_without_followers_creates_no_notifications() {
    let store = store();
    seed_user_with_followers(&store, "alice", "Alice", &[]).await;
    let posts = PostService::new(store.clone());

    posts.create("alice", "quiet post", "").await.unwrap();
    assert_eq!(store.list(models::POSTS_COLLECTION).await.unwrap().len(), 1);
    assert!(inbox(&store, "alice").await.is_empty());
}

#[tokio::test]
async fn test_fanout_partitions_1200_recipients_into_three_groups() {
    let store = store_with_batch_limit(500);
    let recipients: Vec<String> = (0..1200).map(|i| format!("follower-{i}")).collect();
    let fanout = Fanout::new(store.clone());
    let notification = Notification::new_post("p1", &UserProfile::new("Alice", ""));

    let report = fanout.notify_all(&recipients, &notification).await;
    assert_eq!(report.recipients, 1200);
    assert_eq!(report.groups, 3); // 500 + 500 + 200
    assert_eq!(report.failed_groups, 0);

    for uid in &recipients {
        let entries = inbox(&store, uid).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].str_field("postId"), Some("p1"));
    }
}

#[tokio::test]
async fn test_worker_fans_out_posts_inserted_outside_the_callable() {
    let store = store();
    seed_user_with_followers(&store, "alice", "Alice", &["f1", "f2"]).await;
    let worker = PostCreatedWorker::new(store.clone());
    tokio::spawn(worker.run());

    // An administrative insert: no idempotency marker.
    store
        .set(
            &models::post_path("migrated-1"),
            Post::write_data("alice", "imported post", "", false),
        )
        .await
        .unwrap();

    assert!(
        wait_until(|| {
            let store = store.clone();
            async move {
                inbox(&store, "f1").await.len() == 1 && inbox(&store, "f2").await.len() == 1
            }
        })
        .await,
        "worker should fan the post out to both followers"
    );
    let entries = inbox(&store, "f1").await;
    assert_eq!(entries[0].str_field("type"), Some("post"));
    assert_eq!(entries[0].str_field("postId"), Some("migrated-1"));

    // The marker is set after the fallback fan-out.
    assert!(
        wait_until(|| {
            let store = store.clone();
            async move {
                store
                    .get(&models::post_path("migrated-1"))
                    .await
                    .unwrap()
                    .unwrap()
                    .bool_field("notified")
                    == Some(true)
            }
        })
        .await
    );
}

#[tokio::test]
async fn test_worker_skips_posts_created_by_the_callable() {
    let store = store();
    seed_user_with_followers(&store, "alice", "Alice", &["f1"]).await;
    let worker = PostCreatedWorker::new(store.clone());
    tokio::spawn(worker.run());

    let posts = PostService::new(store.clone());
    posts.create("alice", "hello", "").await.unwrap();

    assert!(
        wait_until(|| {
            let store = store.clone();
            async move { inbox(&store, "f1").await.len() == 1 }
        })
        .await
    );

    // Give the worker time to mis-handle the event if it were going to;
    // the follower must still have exactly one notification.
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
    assert_eq!(inbox(&store, "f1").await.len(), 1);
}

#[tokio::test]
async fn test_worker_ignores_posts_without_an_author_document() {
    let store = store();
    let worker = PostCreatedWorker::new(store.clone());
    tokio::spawn(worker.run());

    store
        .set(
            &models::post_path("orphan-1"),
            Post::write_data("ghost", "no author", "", false),
        )
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
    let snapshot = store
        .get(&models::post_path("orphan-1"))
        .await
        .unwrap()
        .unwrap();
    // No-op: the post is left unmarked and nothing was fanned out.
    assert_eq!(snapshot.bool_field("notified"), Some(false));
}
