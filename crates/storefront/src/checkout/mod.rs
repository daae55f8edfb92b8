//! Checkout flow.
//!
//! # Architecture
//!
//! - [`CheckoutFlow`] is a small state machine:
//!   `Shipping -> Payment -> Review -> Complete`
//! - Moving forward is gated by form validation; a failed gate keeps the
//!   step and records one message per missing field
//! - Moving back never loses entered values
//! - Entering `Complete` hands off to [`CompletionEffects`], which clears
//!   the cart and then redirects home on a timer
//! - An empty cart short-circuits everything except the completion screen

mod effects;
mod summary;

pub use effects::CompletionEffects;
pub use summary::{FLAT_SHIPPING, FREE_SHIPPING_THRESHOLD, OrderSummary, TAX_RATE};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Default country for shipping.
pub const DEFAULT_COUNTRY: &str = "United States";

// =============================================================================
// Steps
// =============================================================================

/// Where the shopper is in checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Review,
    Complete,
}

impl CheckoutStep {
    /// The three numbered steps shown in the progress bar.
    pub const NUMBERED: [Self; 3] = [Self::Shipping, Self::Payment, Self::Review];

    /// Progress-bar number (1-3), or `None` once complete.
    #[must_use]
    pub const fn number(self) -> Option<u8> {
        match self {
            Self::Shipping => Some(1),
            Self::Payment => Some(2),
            Self::Review => Some(3),
            Self::Complete => None,
        }
    }

    /// Progress-bar title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
            Self::Review => "Review",
            Self::Complete => "Complete",
        }
    }
}

/// What the checkout page should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutScreen {
    /// "Your cart is empty" with only a continue-shopping action.
    EmptyCart,
    /// One of the numbered form steps.
    Step(CheckoutStep),
    /// Order placed, waiting to redirect.
    Complete,
}

// =============================================================================
// Form Data
// =============================================================================

/// A checkout form field, named as in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutField {
    FullName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    CardNumber,
    CardName,
    ExpiryDate,
    Cvv,
}

impl CheckoutField {
    /// Form field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::CardNumber => "cardNumber",
            Self::CardName => "cardName",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
        }
    }

    /// Message shown when the field is left empty.
    #[must_use]
    pub const fn required_message(self) -> &'static str {
        match self {
            Self::FullName => "Name is required",
            Self::Email => "Email is required",
            Self::Phone => "Phone is required",
            Self::Address => "Address is required",
            Self::City => "City is required",
            Self::State => "State is required",
            Self::ZipCode => "ZIP code is required",
            Self::CardNumber => "Card number is required",
            Self::CardName => "Name on card is required",
            Self::ExpiryDate => "Expiry date is required",
            Self::Cvv => "CVV is required",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Step 1 form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ShippingInfo {
    fn required(&self) -> [(CheckoutField, &str); 7] {
        [
            (CheckoutField::FullName, self.full_name.as_str()),
            (CheckoutField::Email, self.email.as_str()),
            (CheckoutField::Phone, self.phone.as_str()),
            (CheckoutField::Address, self.address.as_str()),
            (CheckoutField::City, self.city.as_str()),
            (CheckoutField::State, self.state.as_str()),
            (CheckoutField::ZipCode, self.zip_code.as_str()),
        ]
    }
}

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    #[serde(rename = "paypal")]
    PayPal,
    ApplePay,
}

impl PaymentMethod {
    pub const ALL: [Self; 3] = [Self::CreditCard, Self::PayPal, Self::ApplePay];

    /// Form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::PayPal => "paypal",
            Self::ApplePay => "apple-pay",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::PayPal => "PayPal",
            Self::ApplePay => "Apple Pay",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown payment method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment method: {0}")]
pub struct PaymentMethodParseError(pub String);

impl FromStr for PaymentMethod {
    type Err = PaymentMethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| PaymentMethodParseError(s.to_string()))
    }
}

/// Step 2 form.
///
/// The card fields are required whichever method is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
    pub payment_method: PaymentMethod,
}

impl PaymentInfo {
    fn required(&self) -> [(CheckoutField, &str); 4] {
        [
            (CheckoutField::CardNumber, self.card_number.as_str()),
            (CheckoutField::CardName, self.card_name.as_str()),
            (CheckoutField::ExpiryDate, self.expiry_date.as_str()),
            (CheckoutField::Cvv, self.cvv.as_str()),
        ]
    }

    /// Card number with all but the last four digits hidden.
    #[must_use]
    pub fn masked_card_number(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let last4: String = digits.iter().skip(digits.len().saturating_sub(4)).collect();
        format!("**** **** **** {last4}")
    }
}

/// Field-keyed validation messages for the current step.
pub type ValidationErrors = BTreeMap<CheckoutField, &'static str>;

fn missing_fields<'a>(fields: impl IntoIterator<Item = (CheckoutField, &'a str)>) -> ValidationErrors {
    fields
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| (field, field.required_message()))
        .collect()
}

// =============================================================================
// Order Confirmation
// =============================================================================

/// Receipt for a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    /// Generated order number.
    pub order_id: Uuid,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Totals at the time the order was placed.
    pub summary: OrderSummary,
    /// Where the order ships.
    pub ship_to: ShippingInfo,
    pub payment_method: PaymentMethod,
}

impl OrderConfirmation {
    /// Short, shopper-facing order number.
    #[must_use]
    pub fn order_number(&self) -> String {
        self.order_id
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase()
    }
}

// =============================================================================
// CheckoutFlow
// =============================================================================

/// The checkout state machine.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: CheckoutStep,
    /// Shipping form values.
    pub shipping: ShippingInfo,
    /// Payment form values.
    pub payment: PaymentInfo,
    errors: ValidationErrors,
    confirmation: Option<OrderConfirmation>,
}

impl CheckoutFlow {
    /// Start at the shipping step with empty forms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    /// Validation messages from the last forward attempt.
    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Message for one field, if it failed validation.
    #[must_use]
    pub fn error(&self, field: CheckoutField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// The placed order, once complete.
    #[must_use]
    pub const fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// What to render, given whether the cart is currently empty.
    ///
    /// The empty-cart guard wins over every step except `Complete`, since
    /// completing an order empties the cart.
    #[must_use]
    pub fn screen(&self, cart_is_empty: bool) -> CheckoutScreen {
        match self.step {
            CheckoutStep::Complete => CheckoutScreen::Complete,
            _ if cart_is_empty => CheckoutScreen::EmptyCart,
            step => CheckoutScreen::Step(step),
        }
    }

    /// Try to advance one step.
    ///
    /// Validates the current step's form; on failure the step is kept and
    /// [`Self::errors`] lists each empty field. Returns whether the step
    /// changed. Does nothing on `Review` (use [`Self::place_order`]) or
    /// `Complete`.
    #[instrument(skip(self), fields(step = ?self.step))]
    pub fn next(&mut self) -> bool {
        let (errors, to) = match self.step {
            CheckoutStep::Shipping => (
                missing_fields(self.shipping.required()),
                CheckoutStep::Payment,
            ),
            CheckoutStep::Payment => (
                missing_fields(self.payment.required()),
                CheckoutStep::Review,
            ),
            CheckoutStep::Review | CheckoutStep::Complete => return false,
        };

        self.errors = errors;
        if self.errors.is_empty() {
            debug!(to = ?to, "Checkout step advanced");
            self.step = to;
            true
        } else {
            debug!(missing = self.errors.len(), "Checkout step blocked by validation");
            false
        }
    }

    /// Go back one step, keeping every entered value.
    ///
    /// Does nothing on `Shipping` or `Complete`.
    pub fn back(&mut self) {
        self.step = match self.step {
            CheckoutStep::Payment => CheckoutStep::Shipping,
            CheckoutStep::Review => CheckoutStep::Payment,
            step @ (CheckoutStep::Shipping | CheckoutStep::Complete) => step,
        };
    }

    /// Place the order from the review step.
    ///
    /// Returns the confirmation, or `None` when not on `Review`. The cart is
    /// not touched here; run [`CompletionEffects`] afterwards.
    #[instrument(skip(self, summary))]
    pub fn place_order(&mut self, summary: OrderSummary) -> Option<OrderConfirmation> {
        if self.step != CheckoutStep::Review {
            return None;
        }

        let confirmation = OrderConfirmation {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            summary,
            ship_to: self.shipping.clone(),
            payment_method: self.payment.payment_method,
        };
        info!(
            order_id = %confirmation.order_id,
            total = %confirmation.summary.total,
            "Order placed"
        );

        self.step = CheckoutStep::Complete;
        self.confirmation = Some(confirmation.clone());
        Some(confirmation)
    }
}
