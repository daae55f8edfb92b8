//! Product grid, product page and filter panel.
//!
//! # Usage
//!
//! ```bash
//! luxe browse --search shirt --category "men's clothing" --sort price-low
//! luxe product 3 --add 2
//! luxe filters price-range 10 250
//! ```

use rust_decimal::Decimal;
use tracing::{info, warn};

use luxe_core::{ProductId, SortBy};
use luxe_storefront::view::{self, RELATED_PRODUCTS_LIMIT, ViewCriteria};

use super::App;
use crate::error::{AppError, Result};
use crate::output;

/// Filter changes requested on the command line.
#[derive(Debug, Default)]
pub struct FilterChanges {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<SortBy>,
}

/// Show the product grid, applying and remembering any filter changes.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn browse(app: &mut App, changes: FilterChanges) -> Result<()> {
    if let Some(search) = changes.search {
        app.store.set_search_query(search);
    }
    if let Some(category) = changes.category {
        app.store.set_selected_category(category);
    }
    if let Some(sort) = changes.sort {
        app.store.set_sort_by(sort);
    }

    info!("Loading products...");
    let products = app.catalog.fetch_products().await?;
    let shown = view::filter_and_sort(&products, &ViewCriteria::from(app.store.session()));

    output::products(&shown);
    Ok(())
}

/// Show one product, optionally adding it to the cart or wishlist.
///
/// # Errors
///
/// Returns an error if the product cannot be loaded.
pub async fn product(
    app: &mut App,
    id: ProductId,
    add: Option<u32>,
    toggle_wishlist: bool,
) -> Result<()> {
    let product = app.product(id).await?;

    if let Some(quantity) = add {
        if quantity == 0 {
            return Err(AppError::BadRequest("Quantity must be at least 1".to_string()));
        }
        app.store.add_to_cart_quantity(&product, quantity);
        output::line(&format!("Added {quantity} x {} to cart", product.title));
    }
    if toggle_wishlist {
        let saved = app.store.toggle_wishlist(&product);
        output::line(if saved {
            "Added to wishlist"
        } else {
            "Removed from wishlist"
        });
    }

    // Related products are a nicety; the page still renders without them.
    let catalog = match app.catalog.fetch_products().await {
        Ok(products) => products,
        Err(e) => {
            warn!(error = %e, "Could not load related products");
            Vec::new()
        }
    };
    let related = view::related_products(&catalog, &product, RELATED_PRODUCTS_LIMIT);

    output::product_detail(&product, app.store.is_in_wishlist(id), &related);
    Ok(())
}

/// Show the current filters and the categories available.
///
/// The category list is omitted if the catalog is unreachable.
pub async fn show_filters(app: &App) {
    let categories = match app.catalog.fetch_products().await {
        Ok(products) => Some(view::categories(&products)),
        Err(e) => {
            warn!(error = %e, "Could not load categories");
            None
        }
    };
    output::filters(app.store.session(), categories.as_deref());
}

/// Set the price filter bounds.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] for a negative bound or `min > max`.
pub fn set_price_range(app: &mut App, min: Decimal, max: Decimal) -> Result<()> {
    if !app.store.set_price_range(min, max) {
        return Err(AppError::BadRequest(format!(
            "Invalid price range {min} - {max}: bounds must be non-negative and min at most max"
        )));
    }
    output::filters(app.store.session(), None);
    Ok(())
}
