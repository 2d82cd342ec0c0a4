pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod metrics;
pub mod models;
pub mod services;
pub mod workers;

pub use config::Config;
pub use error::{AppError, ServiceResult};
