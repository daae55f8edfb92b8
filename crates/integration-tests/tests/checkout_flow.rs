//! End-to-end checkout: catalog products into the cart, through every form
//! step, to a placed order with an emptied, persisted cart.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal::Decimal;

use luxe_core::ProductId;
use luxe_integration_tests::FakeCatalog;
use luxe_storefront::Route;
use luxe_storefront::checkout::{
    CheckoutField, CheckoutFlow, CheckoutScreen, CheckoutStep, CompletionEffects, OrderSummary,
    PaymentInfo, PaymentMethod, ShippingInfo,
};
use luxe_storefront::store::{FileSnapshotStore, ShoppingStore};

fn shipping() -> ShippingInfo {
    ShippingInfo {
        full_name: "John Doe".to_string(),
        email: "john@gmail.com".to_string(),
        phone: "1-570-236-7033".to_string(),
        address: "7682 new road".to_string(),
        city: "kilcoole".to_string(),
        state: "NSW".to_string(),
        zip_code: "12926-3874".to_string(),
        ..ShippingInfo::default()
    }
}

fn payment() -> PaymentInfo {
    PaymentInfo {
        card_number: "4111 1111 1111 1111".to_string(),
        card_name: "John Doe".to_string(),
        expiry_date: "08/29".to_string(),
        cvv: "737".to_string(),
        payment_method: PaymentMethod::ApplePay,
    }
}

/// Timers short enough for a real-clock test.
const QUICK: CompletionEffects = CompletionEffects {
    settle_delay: Duration::from_millis(10),
    redirect_delay: Duration::from_millis(10),
};

#[tokio::test]
async fn test_checkout_end_to_end() {
    let server = FakeCatalog::start().await;
    let client = server.client();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("luxe.json");

    let mut store = ShoppingStore::open(FileSnapshotStore::new(&path));
    let backpack = client.fetch_product(ProductId::new(1)).await.unwrap();
    let tee = client.fetch_product(ProductId::new(2)).await.unwrap();
    store.add_to_cart(&backpack);
    store.add_to_cart_quantity(&tee, 2);

    let mut flow = CheckoutFlow::new();
    assert_eq!(
        flow.screen(store.cart().is_empty()),
        CheckoutScreen::Step(CheckoutStep::Shipping)
    );

    // Missing email blocks step 1.
    flow.shipping = ShippingInfo {
        email: String::new(),
        ..shipping()
    };
    assert!(!flow.next());
    assert_eq!(flow.step(), CheckoutStep::Shipping);
    assert_eq!(flow.error(CheckoutField::Email), Some("Email is required"));

    flow.shipping.email = "john@gmail.com".to_string();
    assert!(flow.next());

    flow.payment = payment();
    assert!(flow.next());
    assert_eq!(flow.step(), CheckoutStep::Review);

    // Back and forward again without losing anything.
    flow.back();
    flow.back();
    assert_eq!(flow.shipping, shipping());
    assert!(flow.next());
    assert!(flow.next());

    let summary = OrderSummary::from_subtotal(store.cart_total());
    assert_eq!(summary.subtotal, Decimal::new(15455, 2));
    assert!(summary.has_free_shipping());

    let confirmation = flow.place_order(summary).unwrap();
    assert_eq!(confirmation.payment_method, PaymentMethod::ApplePay);
    assert_eq!(flow.screen(false), CheckoutScreen::Complete);

    let mut navigated = None;
    QUICK.run(&mut store, |route| navigated = Some(route)).await;

    assert_eq!(navigated, Some(Route::Home));
    assert_eq!(store.cart_count(), 0);
    assert_eq!(flow.screen(store.cart().is_empty()), CheckoutScreen::Complete);

    let reopened = ShoppingStore::open(FileSnapshotStore::new(&path));
    assert!(reopened.cart().is_empty());
}

#[test]
fn test_empty_cart_is_guarded() {
    let store = ShoppingStore::new();
    let mut flow = CheckoutFlow::new();
    flow.shipping = shipping();
    assert!(flow.next());

    assert_eq!(flow.screen(store.cart().is_empty()), CheckoutScreen::EmptyCart);
}

#[tokio::test]
async fn test_small_order_pays_shipping_and_tax() {
    let server = FakeCatalog::start().await;
    let earrings = server
        .client()
        .fetch_product(ProductId::new(8))
        .await
        .unwrap();

    let mut store = ShoppingStore::new();
    store.add_to_cart(&earrings);

    let summary = OrderSummary::from_subtotal(store.cart_total());
    assert_eq!(summary.shipping, Decimal::new(999, 2));
    assert_eq!(summary.tax, Decimal::new(8792, 4));
    assert_eq!(summary.total, Decimal::new(218592, 4));
    assert_eq!(
        summary.amount_until_free_shipping(),
        Some(Decimal::new(8901, 2))
    );
}
