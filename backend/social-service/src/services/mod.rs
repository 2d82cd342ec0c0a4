mod fanout;
mod follow;
mod inbox;
mod likes;
mod posts;
mod profiles;

pub use fanout::{Fanout, FanoutReport};
pub use follow::FollowService;
pub use inbox::{InboxEntry, InboxService, InboxSubscription, INBOX_LIMIT};
pub use likes::LikeService;
pub use posts::PostService;
pub use profiles::ProfileService;
