pub mod post_created;

pub use post_created::PostCreatedWorker;
