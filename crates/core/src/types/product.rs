//! The product record shared by the catalog and the cart.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable product.
///
/// Products are created once at catalog load time and never mutated. The
/// cart stores a full snapshot of this record per entry, so later catalog
/// changes do not propagate into existing carts.
///
/// Field names serialize in camelCase to stay wire-compatible with the
/// catalog data source and previously persisted carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique stable identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price in the store's implied currency.
    pub price: Price,
    /// Category label. A small closed-ish set in practice, but deliberately
    /// not an enum: the catalog source may introduce new categories.
    pub category: String,
    /// Average rating, expected range [0, 5].
    pub rating: f64,
    /// Image references; the first is the primary/thumbnail.
    pub images: Vec<String>,
    /// Free-text description.
    pub description: String,
    /// Ordered free-text specification lines.
    pub specifications: Vec<String>,
    /// Availability flag.
    pub in_stock: bool,
}
