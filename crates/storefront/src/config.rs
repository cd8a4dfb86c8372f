//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults produce a self-contained demo store.
//!
//! - `TECHSTORE_DATA_DIR` - Directory for the durable key-value slot
//!   (default: `.techstore`)
//! - `TECHSTORE_CART_KEY` - Slot key for the persisted cart
//!   (default: `techstore-cart`)
//! - `TECHSTORE_CATALOG_PATH` - Path to a catalog JSON file; when unset the
//!   embedded demo catalog is used
//! - `TECHSTORE_FEEDBACK_DELAY_MS` - Delay before the cart sidebar opens
//!   after an add-to-cart, in milliseconds (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default slot key for cart persistence.
const DEFAULT_CART_KEY: &str = "techstore-cart";

/// Default directory for the durable key-value slot.
const DEFAULT_DATA_DIR: &str = ".techstore";

/// Default add-to-cart feedback delay.
const DEFAULT_FEEDBACK_DELAY_MS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory backing the durable key-value slot.
    pub data_dir: PathBuf,
    /// Slot key the cart persists under.
    pub cart_key: String,
    /// Catalog JSON path; `None` selects the embedded demo catalog.
    pub catalog_path: Option<PathBuf>,
    /// Delay before the cart sidebar opens after an add-to-cart. A UI
    /// nicety, not a correctness mechanism.
    pub feedback_delay: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("TECHSTORE_DATA_DIR", DEFAULT_DATA_DIR));
        let cart_key = get_env_or_default("TECHSTORE_CART_KEY", DEFAULT_CART_KEY);
        let catalog_path = get_optional_env("TECHSTORE_CATALOG_PATH").map(PathBuf::from);

        let feedback_delay_ms = match get_optional_env("TECHSTORE_FEEDBACK_DELAY_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("TECHSTORE_FEEDBACK_DELAY_MS".to_string(), e.to_string())
            })?,
            None => DEFAULT_FEEDBACK_DELAY_MS,
        };

        Ok(Self {
            data_dir,
            cart_key,
            catalog_path,
            feedback_delay: Duration::from_millis(feedback_delay_ms),
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            catalog_path: None,
            feedback_delay: Duration::from_millis(DEFAULT_FEEDBACK_DELAY_MS),
        }
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.cart_key, "techstore-cart");
        assert_eq!(config.data_dir, PathBuf::from(".techstore"));
        assert!(config.catalog_path.is_none());
        assert_eq!(config.feedback_delay, Duration::from_millis(300));
    }
}
