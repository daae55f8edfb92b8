//! Checkout, end to end.
//!
//! Fills both forms from flags, walks the state machine through review and
//! places the order. Missing fields stop the walk at the failing step.

use std::time::Duration;

use luxe_storefront::checkout::{
    CheckoutFlow, CheckoutScreen, CheckoutStep, CompletionEffects, OrderSummary, PaymentInfo,
    ShippingInfo,
};

use super::App;
use crate::error::{AppError, Result};
use crate::output;

/// Run checkout with the given form values.
///
/// With `wait` unset the post-order timers are skipped.
///
/// # Errors
///
/// Returns [`AppError::Checkout`] if a form step fails validation.
pub async fn run(
    app: &mut App,
    shipping: ShippingInfo,
    payment: PaymentInfo,
    wait: bool,
) -> Result<()> {
    let mut flow = CheckoutFlow::new();
    flow.shipping = shipping;
    flow.payment = payment;

    if flow.screen(app.store.cart().is_empty()) == CheckoutScreen::EmptyCart {
        output::line("Your cart is empty");
        output::line("Add some items to checkout");
        return Ok(());
    }

    while matches!(flow.step(), CheckoutStep::Shipping | CheckoutStep::Payment) {
        let step = flow.step();
        if !flow.next() {
            output::validation_errors(flow.errors());
            return Err(AppError::Checkout(format!(
                "{} details are incomplete",
                step.title()
            )));
        }
    }

    let summary = OrderSummary::from_subtotal(app.store.cart_total());
    output::cart(app.store.cart(), &summary);

    let Some(confirmation) = flow.place_order(summary) else {
        return Err(AppError::Checkout("Order could not be placed".to_string()));
    };
    output::line("");
    output::confirmation(&confirmation);

    let effects = if wait {
        CompletionEffects::default()
    } else {
        CompletionEffects {
            settle_delay: Duration::ZERO,
            redirect_delay: Duration::ZERO,
        }
    };
    output::line("Redirecting to home page...");
    effects
        .run(&mut app.store, |route| {
            tracing::info!(route = %route, "Navigating");
        })
        .await;

    Ok(())
}
