//! Unified error handling for the storefront.
//!
//! The error surface is deliberately small: most edge cases in this domain
//! (missing product on a detail view, corrupt persisted cart, unknown price
//! bucket key) degrade to a safe default and are logged rather than raised.
//! `StoreError` covers the cases that genuinely fail an operation, such as an
//! unreadable catalog file or invalid configuration.

use thiserror::Error;

use techstore_core::ProductId;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::persist::SlotError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Catalog data could not be loaded or parsed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration was missing or invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The durable key-value slot failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] SlotError),

    /// Product lookup failed for a caller that requires the product to exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
