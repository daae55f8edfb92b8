//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are plain [`Decimal`] amounts in the store currency. The
//! [`Price`] wrapper pairs an amount with a currency for display, and
//! [`PriceRange`] is the filter-panel range kept in the shopping session.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the default store currency (USD).
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Format for display (e.g., "$19.99").
    ///
    /// Half-cent amounts round away from zero.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{rounded:.2}", self.currency_code.symbol())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes the storefront prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }
}

/// Inclusive price bounds selected in the filter panel.
///
/// Both bounds are non-negative and `min <= max`. Construction through
/// [`PriceRange::new`] is the only way to build one outside this module, so
/// a `PriceRange` held by the session always satisfies the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(Decimal, Decimal)", into = "(Decimal, Decimal)")]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    /// Upper bound of the default range.
    pub const DEFAULT_MAX: i64 = 1000;

    /// Create a range, returning `None` when a bound is negative or the
    /// bounds are inverted.
    #[must_use]
    pub fn new(min: Decimal, max: Decimal) -> Option<Self> {
        if min.is_sign_negative() && !min.is_zero() {
            return None;
        }
        if max.is_sign_negative() && !max.is_zero() {
            return None;
        }
        (min <= max).then_some(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> Decimal {
        self.max
    }

    /// Whether `amount` falls inside the range (inclusive).
    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min <= amount && amount <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::from(Self::DEFAULT_MAX),
        }
    }
}

impl TryFrom<(Decimal, Decimal)> for PriceRange {
    type Error = String;

    fn try_from((min, max): (Decimal, Decimal)) -> Result<Self, Self::Error> {
        Self::new(min, max).ok_or_else(|| format!("invalid price range [{min}, {max}]"))
    }
}

impl From<PriceRange> for (Decimal, Decimal) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}
