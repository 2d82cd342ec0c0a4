pub mod notifications;
pub mod posts;
pub mod profiles;
pub mod social;
