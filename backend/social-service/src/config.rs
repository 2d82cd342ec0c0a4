/// Configuration management for Social Service
///
/// Loads configuration from environment variables.
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Document store configuration
    pub store: StoreSettings,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// HTTP port
    pub http_port: u16,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Maximum writes per atomic batch commit; a property of the chosen
    /// store backend, not of the callers.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Buffered capacity of the store change feed
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

// Default values
fn default_max_batch_size() -> usize {
    500
}

fn default_event_capacity() -> usize {
    256
}

impl StoreSettings {
    pub fn to_store_config(&self) -> doc_store::StoreConfig {
        doc_store::StoreConfig {
            max_batch_size: self.max_batch_size,
            event_capacity: self.event_capacity,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            http_port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8006), // social-service default HTTP port
        };

        let store = StoreSettings {
            max_batch_size: std::env::var("STORE_MAX_BATCH_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_max_batch_size),
            event_capacity: std::env::var("STORE_EVENT_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_event_capacity),
        };

        Ok(Config { app, store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        std::env::remove_var("STORE_MAX_BATCH_SIZE");
        std::env::remove_var("STORE_EVENT_CAPACITY");

        let config = Config::from_env().unwrap();

        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.http_port, 8006);
        assert_eq!(config.store.max_batch_size, 500);
        assert_eq!(config.store.event_capacity, 256);
    }

    #[test]
    fn test_store_settings_conversion() {
        let settings = StoreSettings {
            max_batch_size: 25,
            event_capacity: 8,
        };
        let store_config = settings.to_store_config();
        assert_eq!(store_config.max_batch_size, 25);
        assert_eq!(store_config.event_capacity, 8);
    }
}
