use chrono::{DateTime, Utc};
use doc_store::{DocData, DocPath};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const USERS_COLLECTION: &str = "users";
pub const POSTS_COLLECTION: &str = "posts";
pub const NOTIFICATIONS_SUBCOLLECTION: &str = "notifications";

pub fn user_path(uid: &str) -> DocPath {
    DocPath::new(USERS_COLLECTION, uid)
}

pub fn post_path(post_id: &str) -> DocPath {
    DocPath::new(POSTS_COLLECTION, post_id)
}

/// Collection holding a user's notification inbox.
pub fn inbox_collection(uid: &str) -> String {
    user_path(uid).sub_collection(NOTIFICATIONS_SUBCOLLECTION)
}

pub fn notification_path(uid: &str, notification_id: &str) -> DocPath {
    DocPath::new(inbox_collection(uid), notification_id)
}

/// A user document.
///
/// A uid never appears in its own follower/followee sets; the follow
/// operation rejects self-follow before any write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "displayName", default)]
    pub display_name: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
    #[serde(default)]
    pub followers: Vec<String>,
    #[serde(default)]
    pub following: Vec<String>,
}

impl UserProfile {
    pub fn new(display_name: impl Into<String>, photo_url: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            photo_url: photo_url.into(),
            followers: Vec::new(),
            following: Vec::new(),
        }
    }

    /// Display name with the generic fallback for blank profiles.
    pub fn display_label(&self) -> &str {
        if self.display_name.is_empty() {
            "Someone"
        } else {
            &self.display_name
        }
    }

    pub fn is_following(&self, uid: &str) -> bool {
        self.following.iter().any(|entry| entry == uid)
    }

    pub fn write_data(&self) -> DocData {
        DocData::new()
            .field("displayName", self.display_name.clone())
            .field("photoURL", self.photo_url.clone())
            .field("followers", Value::from(self.followers.clone()))
            .field("following", Value::from(self.following.clone()))
    }
}

/// A post document. The author uid is immutable after creation; only the
/// liker set changes, through the like operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "authorId")]
    pub author_id: String,
    pub content: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "likedBy", default)]
    pub liked_by: Vec<String>,
    /// Fan-out idempotency marker: true once this post's followers have
    /// been notified. Written with the post by the callable create
    /// operation; checked by the post-created worker.
    #[serde(default)]
    pub notified: bool,
}

impl Post {
    /// Field writes for a freshly created post. The timestamp is assigned
    /// by the store at commit time.
    pub fn write_data(author_id: &str, content: &str, image_url: &str, notified: bool) -> DocData {
        DocData::new()
            .field("authorId", author_id)
            .field("content", content)
            .field("imageURL", image_url)
            .server_timestamp("timestamp")
            .field("likedBy", Value::Array(Vec::new()))
            .field("notified", notified)
    }

    pub fn is_liked_by(&self, uid: &str) -> bool {
        self.liked_by.iter().any(|entry| entry == uid)
    }
}

/// What a notification is about. The wire representation is tagged by the
/// `type` field, so each variant carries only the fields it needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NotificationKind {
    Follow,
    Like {
        #[serde(rename = "postId")]
        post_id: String,
    },
    Post {
        #[serde(rename = "postId")]
        post_id: String,
    },
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Follow => "follow",
            NotificationKind::Like { .. } => "like",
            NotificationKind::Post { .. } => "post",
        }
    }

    pub fn post_id(&self) -> Option<&str> {
        match self {
            NotificationKind::Follow => None,
            NotificationKind::Like { post_id } | NotificationKind::Post { post_id } => {
                Some(post_id)
            }
        }
    }
}

/// A notification document. Lives in the recipient's inbox sub-collection
/// and has no existence independent of its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub desc: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    #[serde(rename = "actionURL")]
    pub action_url: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub kind: NotificationKind,
}

impl Notification {
    /// Someone started following the recipient.
    pub fn follow(actor_uid: &str, actor: &UserProfile) -> Self {
        Self {
            title: "New Follower".to_string(),
            desc: format!("{} started following you.", actor.display_label()),
            image_url: actor.photo_url.clone(),
            action_url: format!("/profile/{actor_uid}"),
            read: false,
            timestamp: None,
            kind: NotificationKind::Follow,
        }
    }

    /// Someone liked one of the recipient's posts.
    pub fn like(post_id: &str, actor: &UserProfile) -> Self {
        Self {
            title: "New Like".to_string(),
            desc: format!("{} liked your post.", actor.display_label()),
            image_url: actor.photo_url.clone(),
            action_url: format!("/post/{post_id}"),
            read: false,
            timestamp: None,
            kind: NotificationKind::Like {
                post_id: post_id.to_string(),
            },
        }
    }

    /// Someone the recipient follows published a post.
    pub fn new_post(post_id: &str, author: &UserProfile) -> Self {
        Self {
            title: "New Post".to_string(),
            desc: format!("{} published a new post.", author.display_label()),
            image_url: author.photo_url.clone(),
            action_url: format!("/post/{post_id}"),
            read: false,
            timestamp: None,
            kind: NotificationKind::Post {
                post_id: post_id.to_string(),
            },
        }
    }

    /// Field writes for enqueueing this notification. The timestamp is
    /// assigned by the store at commit time.
    pub fn write_data(&self) -> DocData {
        let mut data = DocData::new()
            .field("type", self.kind.as_str())
            .field("title", self.title.clone())
            .field("desc", self.desc.clone())
            .field("imageURL", self.image_url.clone())
            .field("actionURL", self.action_url.clone())
            .field("read", self.read)
            .server_timestamp("timestamp");
        if let Some(post_id) = self.kind.post_id() {
            data = data.field("postId", post_id);
        }
        data
    }
}
