//! Application state wiring the stores together.
//!
//! The stores are explicitly constructed here and injected into whatever
//! presentation layer drives them - no ambient globals. `AppState` owns the
//! catalog and the cart store; consumers read the catalog freely and route
//! all cart mutations through [`AppState::cart_mut`] (single-writer
//! contract, see [`crate::cart::CartStore`]).

use techstore_core::{Product, ProductId};

use crate::cart::CartStore;
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::{Result, StoreError};
use crate::persist::FileSlot;

/// Application state for one storefront session.
pub struct AppState {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: CartStore,
}

impl AppState {
    /// Build the stores from configuration.
    ///
    /// The catalog comes from `config.catalog_path` when set, otherwise the
    /// embedded demo catalog. The cart hydrates from a [`FileSlot`] over
    /// `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be loaded. A
    /// missing or corrupt persisted cart is not an error (see
    /// [`CartStore::restore`]).
    pub fn from_config(config: StorefrontConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::demo(),
        };

        let slot = FileSlot::new(config.data_dir.clone());
        let cart = CartStore::restore(Box::new(slot), config.cart_key.clone())
            .with_feedback_delay(config.feedback_delay);

        Ok(Self {
            config,
            catalog,
            cart,
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get read access to the cart store.
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Get mutable access to the cart store (the single writer).
    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Look up a product, failing with [`StoreError::ProductNotFound`] when
    /// absent. For callers that want an error instead of the navigate-away
    /// `Option` that [`Catalog::by_id`] returns.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` if the ID is unknown.
    pub fn require_product(&self, id: &ProductId) -> Result<&Product> {
        self.catalog
            .by_id(id)
            .ok_or_else(|| StoreError::ProductNotFound(id.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn demo_state() -> AppState {
        let config = StorefrontConfig {
            data_dir: std::env::temp_dir().join(format!("techstore-state-{}", uuid::Uuid::new_v4())),
            ..StorefrontConfig::default()
        };
        AppState::from_config(config).unwrap()
    }

    #[test]
    fn test_from_config_uses_demo_catalog() {
        let state = demo_state();
        assert_eq!(state.catalog().len(), 15);
        assert!(state.cart().entries().is_empty());
    }

    #[test]
    fn test_require_product() {
        let state = demo_state();
        assert!(state.require_product(&ProductId::new("1")).is_ok());

        let err = state.require_product(&ProductId::new("999")).unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound(_)));
    }

    #[test]
    fn test_cart_mutations_flow_through_state() {
        let mut state = demo_state();
        let product = state.require_product(&ProductId::new("3")).unwrap().clone();

        state.cart_mut().add_to_cart(&product);
        assert_eq!(state.cart().items_count(), 1);

        std::fs::remove_dir_all(&state.config().data_dir).unwrap();
    }
}
