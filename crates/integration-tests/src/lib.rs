//! Shared helpers for TechStore integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use techstore_storefront::config::StorefrontConfig;

/// A unique data directory for one test, removed on drop.
pub struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    /// Create a fresh, non-existing directory path under the system temp dir.
    #[must_use]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("techstore-test-{}", uuid::Uuid::new_v4()));
        Self { path }
    }

    /// The directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A storefront config persisting into this directory, with the demo
    /// catalog and default cart key.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            data_dir: self.path.clone(),
            ..StorefrontConfig::default()
        }
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
