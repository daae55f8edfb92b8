//! Cart and wishlist commands.

use luxe_core::ProductId;
use luxe_storefront::checkout::OrderSummary;

use super::App;
use crate::error::{AppError, Result};
use crate::output;

// =============================================================================
// Cart
// =============================================================================

/// Print the cart with its totals.
pub fn show(app: &App) {
    let summary = OrderSummary::from_subtotal(app.store.cart_total());
    output::cart(app.store.cart(), &summary);
}

/// Add units of a product to the cart.
///
/// # Errors
///
/// Returns an error if the product cannot be loaded or `quantity` is zero.
pub async fn add(app: &mut App, id: ProductId, quantity: u32) -> Result<()> {
    if quantity == 0 {
        return Err(AppError::BadRequest("Quantity must be at least 1".to_string()));
    }
    let product = app.product(id).await?;
    app.store.add_to_cart_quantity(&product, quantity);
    output::line(&format!("Added {quantity} x {} to cart", product.title));
    show(app);
    Ok(())
}

/// Set a line's quantity; zero or less removes it.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if the product isn't in the cart.
pub fn set(app: &mut App, id: ProductId, quantity: i64) -> Result<()> {
    require_in_cart(app, id)?;
    app.store.update_quantity(id, quantity);
    show(app);
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if the product isn't in the cart.
pub fn remove(app: &mut App, id: ProductId) -> Result<()> {
    require_in_cart(app, id)?;
    app.store.remove_from_cart(id);
    show(app);
    Ok(())
}

/// Empty the cart.
pub fn clear(app: &mut App) {
    app.store.clear_cart();
    output::line("Cart cleared");
}

fn require_in_cart(app: &App, id: ProductId) -> Result<()> {
    if app.store.session().cart_line(id).is_none() {
        return Err(AppError::NotFound(format!("Cart item {id}")));
    }
    Ok(())
}

// =============================================================================
// Wishlist
// =============================================================================

/// Print saved products.
pub fn show_wishlist(app: &App) {
    output::wishlist(app.store.wishlist());
}

/// Save or unsave a product.
///
/// # Errors
///
/// Returns an error if the product cannot be loaded.
pub async fn toggle_wishlist(app: &mut App, id: ProductId) -> Result<()> {
    let product = app.product(id).await?;
    let saved = app.store.toggle_wishlist(&product);
    output::line(&format!(
        "{} {}",
        if saved { "Saved" } else { "Removed" },
        product.title
    ));
    Ok(())
}

/// Unsave a product.
///
/// # Errors
///
/// Returns [`AppError::NotFound`] if the product isn't saved.
pub fn remove_from_wishlist(app: &mut App, id: ProductId) -> Result<()> {
    if !app.store.is_in_wishlist(id) {
        return Err(AppError::NotFound(format!("Wishlist item {id}")));
    }
    app.store.remove_from_wishlist(id);
    show_wishlist(app);
    Ok(())
}

/// Add every saved product to the cart.
pub fn move_wishlist_to_cart(app: &mut App) {
    let moved = app.store.move_wishlist_to_cart();
    output::line(&format!("Added {moved} items to cart"));
}
