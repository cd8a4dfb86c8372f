//! Read-only queries over the static product catalog.
//!
//! The catalog is loaded once (from an embedded fixture or a JSON file) and
//! never mutated afterwards. Every query is a pure function of the catalog
//! and its arguments; results preserve declaration order.

use std::path::Path;

use thiserror::Error;

use techstore_core::{PriceRange, Product, ProductId};

/// Sentinel category meaning "no category filter".
pub const ALL_PRODUCTS: &str = "All Products";

/// Embedded demo catalog (15 products across four categories).
const DEMO_CATALOG_JSON: &str = include_str!("../data/products.json");

/// Error loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog data was not valid JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The static product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from an already-built product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON does not decode.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products))
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            products = catalog.products.len(),
            path = %path.display(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// The embedded demo catalog.
    #[must_use]
    pub fn demo() -> Self {
        Self::from_json(DEMO_CATALOG_JSON).expect("embedded demo catalog is valid JSON")
    }

    /// All products in declaration order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    ///
    /// Returns `None` when the ID is unknown; detail views are expected to
    /// navigate away rather than treat this as a failure.
    #[must_use]
    pub fn by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products whose category equals `category` exactly (case-sensitive).
    ///
    /// The [`ALL_PRODUCTS`] sentinel and the empty string both mean "no
    /// filter" and return the full catalog.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Product> {
        if category == ALL_PRODUCTS || category.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|product| product.category == category)
            .collect()
    }

    /// Distinct categories in first-seen order, with the [`ALL_PRODUCTS`]
    /// sentinel prepended.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_PRODUCTS.to_string()];
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        categories
    }

    /// Products whose name or description contains `text`, compared
    /// case-insensitively. Empty text returns the full catalog.
    #[must_use]
    pub fn search(&self, text: &str) -> Vec<&Product> {
        if text.is_empty() {
            return self.products.iter().collect();
        }
        let needle = text.to_lowercase();
        self.products
            .iter()
            .filter(|product| {
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Products whose price falls inside `range`, inclusive on both ends.
    #[must_use]
    pub fn in_price_range(&self, range: &PriceRange) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| range.contains(product.price))
            .collect()
    }
}
