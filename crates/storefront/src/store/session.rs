//! The shopping session aggregate and its derived selectors.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use luxe_core::{AuthToken, CartLine, PriceRange, ProductId, SortBy, User, WishlistEntry};

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Everything the storefront remembers about the shopper between runs.
///
/// Field names serialize in camelCase, matching the snapshot layout written
/// by earlier releases of the storefront, and every field has a default so
/// snapshots missing newer fields still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShoppingSession {
    /// Signed-in shopper, if any.
    pub user: Option<User>,
    /// Token issued at login.
    pub token: Option<AuthToken>,
    /// Cart lines in insertion order, at most one per product.
    pub cart: Vec<CartLine>,
    /// Saved products in insertion order, at most one per product.
    pub wishlist: Vec<WishlistEntry>,
    /// Free-text catalog search.
    pub search_query: String,
    /// Selected category, or [`ALL_CATEGORIES`].
    pub selected_category: String,
    /// Filter panel price bounds.
    pub price_range: PriceRange,
    /// Product grid ordering.
    pub sort_by: SortBy,
}

impl Default for ShoppingSession {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            cart: Vec::new(),
            wishlist: Vec::new(),
            search_query: String::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            price_range: PriceRange::default(),
            sort_by: SortBy::default(),
        }
    }
}

impl ShoppingSession {
    /// Sum of `price * quantity` over the cart, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.cart
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Total units in the cart (not the number of lines).
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.cart.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn cart_line_count(&self) -> usize {
        self.cart.len()
    }

    /// The cart line for a product, if any.
    #[must_use]
    pub fn cart_line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.product_id() == product_id)
    }

    /// Whether a product is saved in the wishlist.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.wishlist
            .iter()
            .any(|entry| entry.product_id() == product_id)
    }

    /// Whether a shopper is signed in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    /// Repair a session decoded from storage so the cart holds one line per
    /// product with a positive quantity and the wishlist one entry per
    /// product. Duplicate lines merge by adding quantities; zero-quantity
    /// lines are dropped; later wishlist duplicates are dropped.
    ///
    /// Returns whether anything changed.
    pub fn normalize(&mut self) -> bool {
        let before = (self.cart.len(), self.wishlist.len());

        let mut cart: Vec<CartLine> = Vec::with_capacity(self.cart.len());
        let mut merged = false;
        for line in self.cart.drain(..).filter(|line| line.quantity > 0) {
            match cart
                .iter_mut()
                .find(|kept| kept.product_id() == line.product_id())
            {
                Some(kept) => {
                    kept.quantity = kept.quantity.saturating_add(line.quantity);
                    merged = true;
                }
                None => cart.push(line),
            }
        }
        self.cart = cart;

        let mut seen = HashSet::new();
        self.wishlist.retain(|entry| seen.insert(entry.product_id()));

        merged || before != (self.cart.len(), self.wishlist.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use luxe_core::Product;

    use super::*;

    fn line(id: i64, price: Decimal, quantity: u32) -> CartLine {
        CartLine {
            product: Product::new(ProductId::new(id), format!("Item {id}"), price, "misc"),
            quantity,
        }
    }

    #[test]
    fn test_defaults() {
        let session = ShoppingSession::default();
        assert_eq!(session.selected_category, "all");
        assert_eq!(session.sort_by, SortBy::Default);
        assert_eq!(session.price_range, PriceRange::default());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_normalize_merges_duplicates_and_drops_empty_lines() {
        let price = Decimal::from(10);
        let mut session = ShoppingSession {
            cart: vec![line(1, price, 2), line(2, price, 0), line(1, price, 2), line(3, price, 1)],
            wishlist: vec![
                WishlistEntry(line(5, price, 1).product),
                WishlistEntry(line(6, price, 1).product),
                WishlistEntry(line(5, price, 1).product),
            ],
            ..ShoppingSession::default()
        };

        assert!(session.normalize());
        let cart: Vec<(i64, u32)> = session
            .cart
            .iter()
            .map(|l| (l.product_id().as_i64(), l.quantity))
            .collect();
        assert_eq!(cart, vec![(1, 4), (3, 1)]);
        let wishlist: Vec<i64> = session
            .wishlist
            .iter()
            .map(|e| e.product_id().as_i64())
            .collect();
        assert_eq!(wishlist, vec![5, 6]);

        assert!(!session.normalize());
    }

    #[test]
    fn test_empty_cart_totals() {
        let session = ShoppingSession::default();
        assert_eq!(session.cart_total(), Decimal::ZERO);
        assert_eq!(session.cart_count(), 0);
    }

    #[test]
    fn test_totals_count_units_not_lines() {
        let session = ShoppingSession {
            cart: vec![line(1, Decimal::from(10), 2), line(2, Decimal::from(5), 1)],
            ..ShoppingSession::default()
        };
        assert_eq!(session.cart_total(), Decimal::from(25));
        assert_eq!(session.cart_count(), 3);
        assert_eq!(session.cart_line_count(), 2);
    }

    #[test]
    fn test_partial_snapshot_fills_defaults() {
        let session: ShoppingSession =
            serde_json::from_str(r#"{"searchQuery": "jacket", "sortBy": "price-high"}"#).unwrap();
        assert_eq!(session.search_query, "jacket");
        assert_eq!(session.sort_by, SortBy::PriceDesc);
        assert_eq!(session.selected_category, "all");
        assert!(session.cart.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(ShoppingSession::default()).unwrap();
        assert_eq!(value["selectedCategory"], "all");
        assert_eq!(value["sortBy"], "default");
        assert!(value["user"].is_null());
    }
}
