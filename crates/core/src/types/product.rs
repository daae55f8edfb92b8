//! Catalog products and the cart/wishlist entries that reference them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A product as served by the remote catalog.
///
/// Products are read-only to the storefront: they are decoded from the
/// catalog service and copied into cart lines and wishlist entries, never
/// edited locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Category name (e.g., "electronics").
    pub category: String,
    /// Image URL.
    pub image: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Aggregate review score, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// Create a product with an empty description, no image and no rating.
    #[must_use]
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            category: category.into(),
            image: String::new(),
            description: String::new(),
            rating: None,
        }
    }

    /// Whether the price is a usable, non-negative amount.
    #[must_use]
    pub fn has_valid_price(&self) -> bool {
        !self.price.is_sign_negative() || self.price.is_zero()
    }
}

/// Review score summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score out of 5.
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}

/// A product held in the cart together with its quantity.
///
/// Serialized flat, i.e. the product fields plus a `quantity` field, which is
/// the shape the persisted session snapshot has always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product being bought.
    #[serde(flatten)]
    pub product: Product,
    /// Units of the product, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Start a new line with a single unit.
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// Product identifier of this line.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Price of the line: unit price times quantity.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// A product saved for later. Carries no quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WishlistEntry(pub Product);

impl WishlistEntry {
    /// Product identifier of this entry.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.0.id
    }

    /// The saved product.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "id": 1,
        "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
        "price": 109.95,
        "description": "Your perfect pack for everyday use and walks in the forest.",
        "category": "men's clothing",
        "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
        "rating": { "rate": 3.9, "count": 120 }
    }"#;

    #[test]
    fn test_decode_catalog_product() {
        let product: Product = serde_json::from_str(CATALOG_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(10995, 2));
        assert_eq!(product.category, "men's clothing");
        assert_eq!(product.rating.unwrap().count, 120);
    }

    #[test]
    fn test_line_total_saturates() {
        let line = CartLine {
            product: Product::new(
                ProductId::new(1),
                "Yacht",
                Decimal::from_i128_with_scale(100_000_000_000_000_000_000, 0),
                "misc",
            ),
            quantity: 1_000_000_000,
        };
        assert_eq!(line.line_total(), Decimal::MAX);
    }

    #[test]
    fn test_decode_without_rating() {
        let product: Product = serde_json::from_str(
            r#"{"id": 9, "title": "Drive", "price": 64, "category": "electronics", "image": ""}"#,
        )
        .unwrap();
        assert!(product.rating.is_none());
        assert!(product.description.is_empty());
    }

    #[test]
    fn test_cart_line_is_flat() {
        let line = CartLine {
            product: Product::new(ProductId::new(3), "Jacket", Decimal::new(5599, 2), "men's clothing"),
            quantity: 2,
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["quantity"], 2);

        let back: CartLine = serde_json::from_value(value).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn test_line_total() {
        let mut line = CartLine::new(Product::new(
            ProductId::new(1),
            "Tee",
            Decimal::new(1050, 2),
            "women's clothing",
        ));
        line.quantity = 3;
        assert_eq!(line.line_total(), Decimal::new(3150, 2));
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let product = Product::new(ProductId::new(1), "Broken", Decimal::from(-5), "misc");
        assert!(!product.has_valid_price());
        let free = Product::new(ProductId::new(2), "Sticker", Decimal::ZERO, "misc");
        assert!(free.has_valid_price());
    }
}
