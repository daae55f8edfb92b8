//! Product grid filtering and ordering.
//!
//! Pure functions over a product slice; nothing here touches the store or
//! the network.

use std::cmp::Reverse;

use luxe_core::{Product, SortBy};

use crate::store::{ALL_CATEGORIES, ShoppingSession};

/// How many related products the product page shows.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Inputs to [`filter_and_sort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCriteria {
    pub search_query: String,
    pub selected_category: String,
    pub sort_by: SortBy,
}

impl Default for ViewCriteria {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            selected_category: ALL_CATEGORIES.to_string(),
            sort_by: SortBy::Default,
        }
    }
}

impl From<&ShoppingSession> for ViewCriteria {
    fn from(session: &ShoppingSession) -> Self {
        Self {
            search_query: session.search_query.clone(),
            selected_category: session.selected_category.clone(),
            sort_by: session.sort_by,
        }
    }
}

/// Products matching `criteria`, in display order.
///
/// 1. A trimmed, non-empty query keeps products whose title or category
///    contains it, ignoring case.
/// 2. A category other than [`ALL_CATEGORIES`] keeps exact matches.
/// 3. The result is stably sorted by price or title; [`SortBy::Default`]
///    keeps catalog order. Titles compare ignoring case.
///
/// The session's price range is not applied here; the grid shows it as a
/// filter setting only.
#[must_use]
pub fn filter_and_sort(products: &[Product], criteria: &ViewCriteria) -> Vec<Product> {
    let query = criteria.search_query.trim().to_lowercase();
    let category = criteria.selected_category.as_str();

    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| {
            query.is_empty()
                || product.title.to_lowercase().contains(&query)
                || product.category.to_lowercase().contains(&query)
        })
        .filter(|product| category == ALL_CATEGORIES || product.category == category)
        .cloned()
        .collect();

    match criteria.sort_by {
        SortBy::Default => {}
        SortBy::PriceAsc => matched.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceDesc => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::NameAsc => matched.sort_by_cached_key(title_key),
        SortBy::NameDesc => matched.sort_by_cached_key(|p| Reverse(title_key(p))),
    }

    matched
}

/// Titles order case-insensitively, falling back to the raw title so the
/// order is total.
fn title_key(product: &Product) -> (String, String) {
    (product.title.to_lowercase(), product.title.clone())
}

/// Category choices for the filter panel: [`ALL_CATEGORIES`] followed by
/// each distinct category in first-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// Up to `limit` other products from the same category as `product`.
#[must_use]
pub fn related_products<'a>(
    products: &'a [Product],
    product: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(limit)
        .collect()
}
