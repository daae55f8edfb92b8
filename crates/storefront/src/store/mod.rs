//! Shopping state store.
//!
//! # Architecture
//!
//! - One [`ShoppingStore`] value owns the [`ShoppingSession`] and is passed
//!   to whatever needs it; there is no global instance
//! - Every mutation is synchronous and infallible: malformed input (negative
//!   price, unknown product, inverted price range) is ignored
//! - After a mutation actually changes the session, every registered
//!   [`Subscriber`] is told about it. Persistence is one such subscriber
//!   ([`Persister`]), so store logic is testable without storage
//! - Totals and counts are computed on demand, never stored
//!
//! # Example
//!
//! ```rust,ignore
//! use luxe_storefront::store::{FileSnapshotStore, ShoppingStore};
//!
//! let mut store = ShoppingStore::open(FileSnapshotStore::new(&config.storage_path));
//! store.add_to_cart(&product);
//! println!("{} items, {}", store.cart_count(), store.cart_total());
//! ```

pub mod persist;
mod session;

pub use persist::{
    FileSnapshotStore, MemorySnapshotStore, PersistError, Persister, SNAPSHOT_KEY,
    SnapshotStore, load_session, save_session,
};
pub use session::{ALL_CATEGORIES, ShoppingSession};

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use luxe_core::{
    AuthToken, CartLine, PriceRange, Product, ProductId, SortBy, User, WishlistEntry,
};

use crate::error::{add_breadcrumb, clear_sentry_user, set_sentry_user};

// =============================================================================
// Subscribers
// =============================================================================

/// Which store operation committed a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    AddToCart,
    UpdateQuantity,
    RemoveFromCart,
    ClearCart,
    ToggleWishlist,
    RemoveFromWishlist,
    MoveWishlistToCart,
    SetSearchQuery,
    SetSelectedCategory,
    SetPriceRange,
    SetSortBy,
    SetUser,
    Logout,
}

impl Mutation {
    /// Stable name used in logs and breadcrumbs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddToCart => "add_to_cart",
            Self::UpdateQuantity => "update_quantity",
            Self::RemoveFromCart => "remove_from_cart",
            Self::ClearCart => "clear_cart",
            Self::ToggleWishlist => "toggle_wishlist",
            Self::RemoveFromWishlist => "remove_from_wishlist",
            Self::MoveWishlistToCart => "move_wishlist_to_cart",
            Self::SetSearchQuery => "set_search_query",
            Self::SetSelectedCategory => "set_selected_category",
            Self::SetPriceRange => "set_price_range",
            Self::SetSortBy => "set_sort_by",
            Self::SetUser => "set_user",
            Self::Logout => "logout",
        }
    }

    const fn breadcrumb_category(self) -> &'static str {
        match self {
            Self::AddToCart | Self::UpdateQuantity | Self::RemoveFromCart | Self::ClearCart => {
                "cart"
            }
            Self::ToggleWishlist | Self::RemoveFromWishlist | Self::MoveWishlistToCart => {
                "wishlist"
            }
            Self::SetSearchQuery
            | Self::SetSelectedCategory
            | Self::SetPriceRange
            | Self::SetSortBy => "filters",
            Self::SetUser | Self::Logout => "auth",
        }
    }
}

/// Observer notified after each committed mutation.
pub trait Subscriber {
    /// Called with the session as it stands after `mutation`.
    fn on_commit(&mut self, session: &ShoppingSession, mutation: Mutation);
}

// =============================================================================
// ShoppingStore
// =============================================================================

/// Owner of the shopping session.
pub struct ShoppingStore {
    session: ShoppingSession,
    subscribers: Vec<Box<dyn Subscriber + Send>>,
}

impl Default for ShoppingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShoppingStore {
    /// A store with a fresh default session and no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_session(ShoppingSession::default())
    }

    /// A store starting from an existing session.
    #[must_use]
    pub fn with_session(session: ShoppingSession) -> Self {
        Self {
            session,
            subscribers: Vec::new(),
        }
    }

    /// Restore the session from `snapshots` and keep it persisted there.
    ///
    /// A missing snapshot starts from defaults. An unreadable one is logged
    /// and also starts from defaults; the next mutation overwrites it.
    #[must_use]
    pub fn open<S>(snapshots: S) -> Self
    where
        S: SnapshotStore + Send + 'static,
    {
        let session = match load_session(&snapshots) {
            Ok(Some(session)) => {
                debug!(
                    cart_lines = session.cart.len(),
                    wishlist = session.wishlist.len(),
                    "Restored shopping session"
                );
                session
            }
            Ok(None) => ShoppingSession::default(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable shopping session snapshot");
                ShoppingSession::default()
            }
        };

        if let Some(user) = &session.user {
            set_sentry_user(user);
        }

        let mut store = Self::with_session(session);
        store.subscribe(Persister::new(snapshots));
        store
    }

    /// Register a subscriber for future commits.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// The current session.
    #[must_use]
    pub const fn session(&self) -> &ShoppingSession {
        &self.session
    }

    fn commit(&mut self, mutation: Mutation) {
        debug!(mutation = mutation.as_str(), "Shopping session changed");
        add_breadcrumb(mutation.breadcrumb_category(), mutation.as_str(), None);
        for subscriber in &mut self.subscribers {
            subscriber.on_commit(&self.session, mutation);
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `product`, merging with an existing line.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product) {
        if self.push_units(product, 1) {
            self.commit(Mutation::AddToCart);
        }
    }

    /// Add `quantity` units of `product` at once, as the product page does.
    ///
    /// Zero is a no-op.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart_quantity(&mut self, product: &Product, quantity: u32) {
        if self.push_units(product, quantity) {
            self.commit(Mutation::AddToCart);
        }
    }

    fn push_units(&mut self, product: &Product, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }
        if !product.has_valid_price() {
            warn!(product_id = %product.id, price = %product.price, "Refusing product with negative price");
            return false;
        }

        match self
            .session
            .cart
            .iter_mut()
            .find(|line| line.product_id() == product.id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.session.cart.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }
        true
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// Quantities above `u32::MAX` are clamped. Unknown products are ignored.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(line) = self
            .session
            .cart
            .iter_mut()
            .find(|line| line.product_id() == product_id)
        else {
            return;
        };

        if line.quantity != quantity {
            line.quantity = quantity;
            self.commit(Mutation::UpdateQuantity);
        }
    }

    /// Remove a product's line, if present.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product_id: ProductId) {
        let before = self.session.cart.len();
        self.session
            .cart
            .retain(|line| line.product_id() != product_id);
        if self.session.cart.len() != before {
            self.commit(Mutation::RemoveFromCart);
        }
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) {
        if !self.session.cart.is_empty() {
            self.session.cart.clear();
            self.commit(Mutation::ClearCart);
        }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.session.cart
    }

    /// Sum of `price * quantity` over the cart.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.session.cart_total()
    }

    /// Total units in the cart.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.session.cart_count()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn cart_line_count(&self) -> usize {
        self.session.cart_line_count()
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Save `product` if it isn't saved, unsave it if it is.
    ///
    /// Returns whether the product is in the wishlist afterwards.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn toggle_wishlist(&mut self, product: &Product) -> bool {
        let saved = if self.session.is_in_wishlist(product.id) {
            self.session
                .wishlist
                .retain(|entry| entry.product_id() != product.id);
            false
        } else {
            self.session.wishlist.push(WishlistEntry(product.clone()));
            true
        };
        self.commit(Mutation::ToggleWishlist);
        saved
    }

    /// Whether a product is saved.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: ProductId) -> bool {
        self.session.is_in_wishlist(product_id)
    }

    /// Unsave a product, if saved.
    #[instrument(skip(self))]
    pub fn remove_from_wishlist(&mut self, product_id: ProductId) {
        let before = self.session.wishlist.len();
        self.session
            .wishlist
            .retain(|entry| entry.product_id() != product_id);
        if self.session.wishlist.len() != before {
            self.commit(Mutation::RemoveFromWishlist);
        }
    }

    /// Add one unit of every saved product to the cart.
    ///
    /// The wishlist itself is left as is. Returns how many products were
    /// added.
    #[instrument(skip(self))]
    pub fn move_wishlist_to_cart(&mut self) -> usize {
        let products: Vec<Product> = self
            .session
            .wishlist
            .iter()
            .map(|entry| entry.product().clone())
            .collect();

        let moved = products
            .iter()
            .filter(|product| self.push_units(product, 1))
            .count();

        if moved > 0 {
            self.commit(Mutation::MoveWishlistToCart);
        }
        moved
    }

    /// Saved products in insertion order.
    #[must_use]
    pub fn wishlist(&self) -> &[WishlistEntry] {
        &self.session.wishlist
    }

    /// Number of saved products.
    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        self.session.wishlist.len()
    }

    // =========================================================================
    // Filters
    // =========================================================================

    /// Set the free-text search.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.session.search_query != query {
            self.session.search_query = query;
            self.commit(Mutation::SetSearchQuery);
        }
    }

    /// Set the category filter ([`ALL_CATEGORIES`] for none).
    pub fn set_selected_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        if self.session.selected_category != category {
            self.session.selected_category = category;
            self.commit(Mutation::SetSelectedCategory);
        }
    }

    /// Set the price filter bounds.
    ///
    /// A negative bound or `min > max` is rejected and leaves the current
    /// range in place. Returns whether the range was accepted.
    pub fn set_price_range(&mut self, min: Decimal, max: Decimal) -> bool {
        let Some(range) = PriceRange::new(min, max) else {
            warn!(%min, %max, "Rejecting malformed price range");
            return false;
        };
        if self.session.price_range != range {
            self.session.price_range = range;
            self.commit(Mutation::SetPriceRange);
        }
        true
    }

    /// Set the product ordering.
    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        if self.session.sort_by != sort_by {
            self.session.sort_by = sort_by;
            self.commit(Mutation::SetSortBy);
        }
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Record a signed-in shopper.
    #[instrument(skip(self, user, token), fields(username = %user.username))]
    pub fn set_user(&mut self, user: User, token: AuthToken) {
        set_sentry_user(&user);
        self.session.user = Some(user);
        self.session.token = Some(token);
        self.commit(Mutation::SetUser);
    }

    /// Forget the signed-in shopper. Cart and wishlist are kept.
    #[instrument(skip(self))]
    pub fn logout(&mut self) {
        clear_sentry_user();
        if self.session.user.is_some() || self.session.token.is_some() {
            self.session.user = None;
            self.session.token = None;
            self.commit(Mutation::Logout);
        }
    }

    /// The signed-in shopper, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    /// The login token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.session.token.as_ref()
    }

    /// Whether a shopper is signed in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }
}

impl std::fmt::Debug for ShoppingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShoppingStore")
            .field("session", &self.session)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
