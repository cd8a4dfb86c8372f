//! Catalog browsing commands.

use techstore_core::ProductId;
use techstore_storefront::query::{FilterState, PriceBucket};
use techstore_storefront::state::AppState;

/// List products matching the composed filters and print the shareable
/// query string for non-default filter state.
pub fn list(
    state: &AppState,
    category: Option<String>,
    price_range: Option<String>,
    search: Option<String>,
) {
    let mut filter = FilterState::default();
    if let Some(category) = category {
        filter = filter.with_category(category);
    }
    if let Some(key) = price_range {
        filter = filter.with_bucket(PriceBucket::from_key(&key));
    }
    if let Some(search) = search {
        filter = filter.with_search(search);
    }

    let results = filter.apply(state.catalog());
    for product in &results {
        let stock = if product.in_stock { "" } else { "  [out of stock]" };
        println!(
            "{:>3}  {:>10}  {:<12} {}{stock}",
            product.id, product.price, product.category, product.name
        );
    }

    let noun = if results.len() == 1 { "product" } else { "products" };
    println!("\n{} {noun}", results.len());
    if !filter.is_default() {
        println!("Share: /products?{}", filter.to_query_string());
    }
}

/// Print all categories, sentinel first.
pub fn categories(state: &AppState) {
    for category in state.catalog().categories() {
        println!("{category}");
    }
}

/// Print one product in full.
///
/// # Errors
///
/// Returns `StoreError::ProductNotFound` for an unknown ID.
pub fn show(state: &AppState, id: &str) -> techstore_storefront::Result<()> {
    let product = state.require_product(&ProductId::new(id))?;

    println!("{}  ({})", product.name, product.category);
    println!("Price:   {}", product.price);
    println!("Rating:  {:.1}/5", product.rating);
    println!(
        "Stock:   {}",
        if product.in_stock { "in stock" } else { "out of stock" }
    );
    println!("\n{}", product.description);
    println!("\nSpecifications:");
    for spec in &product.specifications {
        println!("  - {spec}");
    }
    Ok(())
}
