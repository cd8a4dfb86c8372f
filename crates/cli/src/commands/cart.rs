//! Cart session commands.
//!
//! Every command hydrates the cart from the file slot, applies one
//! mutation (which persists immediately), and prints the resulting state,
//! so the cart behaves like one long-running session across invocations.

use techstore_core::ProductId;
use techstore_storefront::state::AppState;

/// Add `quantity` units of a catalog product to the cart.
///
/// # Errors
///
/// Returns `StoreError::ProductNotFound` for an unknown ID.
pub fn add(state: &mut AppState, id: &str, quantity: u32) -> techstore_storefront::Result<()> {
    let product = state.require_product(&ProductId::new(id))?.clone();
    for _ in 0..quantity {
        state.cart_mut().add_to_cart(&product);
    }

    println!("Added {quantity} x {}", product.name);
    summary(state);
    Ok(())
}

/// Remove a product from the cart. Absent IDs are a no-op, not an error.
pub fn remove(state: &mut AppState, id: &str) {
    let id = ProductId::new(id);
    if !state.cart().is_in_cart(&id) {
        println!("Not in cart: {id}");
        return;
    }
    state.cart_mut().remove_from_cart(&id);
    summary(state);
}

/// Set the exact quantity for a product; 0 removes it.
pub fn set(state: &mut AppState, id: &str, quantity: u32) {
    let id = ProductId::new(id);
    state.cart_mut().update_quantity(&id, quantity);
    summary(state);
}

/// Print cart contents and derived totals.
pub fn show(state: &AppState) {
    let cart = state.cart();
    if cart.entries().is_empty() {
        println!("Cart is empty");
        return;
    }

    for entry in cart.entries() {
        println!(
            "{:>3}  {:>2} x {:>10}  =  {:>10}  {}",
            entry.product.id,
            entry.quantity,
            entry.product.price,
            entry.line_total(),
            entry.product.name
        );
    }
    summary(state);
}

/// Empty the cart.
pub fn clear(state: &mut AppState) {
    state.cart_mut().clear();
    println!("Cart cleared");
}

fn summary(state: &AppState) {
    let cart = state.cart();
    println!(
        "\n{} item(s), subtotal {}",
        cart.items_count(),
        cart.subtotal()
    );
}
