//! Order totals derived from the cart subtotal.

use rust_decimal::Decimal;
use serde::Serialize;

use luxe_core::Price;

/// Subtotal above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Flat shipping charge below the threshold (9.99).
pub const FLAT_SHIPPING: Decimal = Decimal::from_parts(999, 0, 0, false, 2);

/// Sales tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Subtotal, shipping, tax and grand total for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl OrderSummary {
    /// Compute the totals for a cart subtotal.
    ///
    /// Amounts saturate at [`Decimal::MAX`].
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING
        };
        let tax = subtotal.saturating_mul(TAX_RATE);

        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }

    /// Whether the order ships free.
    #[must_use]
    pub fn has_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }

    /// How much more the shopper must spend to reach the free-shipping
    /// threshold, or `None` if shipping is already free.
    #[must_use]
    pub fn amount_until_free_shipping(&self) -> Option<Decimal> {
        (!self.has_free_shipping()).then(|| FREE_SHIPPING_THRESHOLD - self.subtotal)
    }

    /// Rows for display: label and formatted amount.
    #[must_use]
    pub fn lines(&self) -> [(&'static str, String); 4] {
        let shipping = if self.has_free_shipping() {
            "FREE".to_string()
        } else {
            Price::usd(self.shipping).display()
        };
        [
            ("Subtotal", Price::usd(self.subtotal).display()),
            ("Shipping", shipping),
            ("Tax", Price::usd(self.tax).display()),
            ("Total", Price::usd(self.total).display()),
        ]
    }
}
