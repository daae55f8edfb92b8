//! Timed effects after an order is placed.

use std::time::Duration;

use tracing::info;

use crate::routes::Route;
use crate::store::ShoppingStore;

/// The two sequential timers that follow "place order".
///
/// After `settle_delay` the cart is cleared; after a further
/// `redirect_delay` the shopper is sent home. Neither can be cancelled once
/// started, short of dropping the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionEffects {
    pub settle_delay: Duration,
    pub redirect_delay: Duration,
}

impl Default for CompletionEffects {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(2),
            redirect_delay: Duration::from_secs(3),
        }
    }
}

impl CompletionEffects {
    /// Run both effects, calling `navigate` with [`Route::Home`] at the end.
    pub async fn run<F>(&self, store: &mut ShoppingStore, navigate: F)
    where
        F: FnOnce(Route),
    {
        tokio::time::sleep(self.settle_delay).await;
        store.clear_cart();
        info!("Order placed successfully!");

        tokio::time::sleep(self.redirect_delay).await;
        navigate(Route::Home);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use luxe_core::{Product, ProductId};
    use rust_decimal::Decimal;
    use tokio::time::Instant;

    use super::*;
    use crate::store::{Mutation, ShoppingSession, Subscriber};

    /// Records when the cart was cleared, relative to `start`.
    struct ClearTimer {
        start: Instant,
        cleared_after: Arc<Mutex<Option<Duration>>>,
    }

    impl Subscriber for ClearTimer {
        fn on_commit(&mut self, _session: &ShoppingSession, mutation: Mutation) {
            if mutation == Mutation::ClearCart {
                *self.cleared_after.lock().unwrap() = Some(self.start.elapsed());
            }
        }
    }

    fn store_with_item() -> ShoppingStore {
        let mut store = ShoppingStore::new();
        store.add_to_cart(&Product::new(
            ProductId::new(1),
            "Backpack",
            Decimal::new(10995, 2),
            "men's clothing",
        ));
        store
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_then_redirect() {
        let start = Instant::now();
        let cleared_after = Arc::new(Mutex::new(None));
        let mut store = store_with_item();
        store.subscribe(ClearTimer {
            start,
            cleared_after: Arc::clone(&cleared_after),
        });

        let mut navigated = None;
        CompletionEffects::default()
            .run(&mut store, |route| navigated = Some((route, start.elapsed())))
            .await;

        assert_eq!(store.cart_count(), 0);
        assert_eq!(*cleared_after.lock().unwrap(), Some(Duration::from_secs(2)));
        assert_eq!(navigated, Some((Route::Home, Duration::from_secs(5))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cart_survives_until_settled() {
        let mut store = store_with_item();
        let effects = CompletionEffects::default();

        let early = tokio::time::timeout(
            Duration::from_millis(1_999),
            effects.run(&mut store, |_| {}),
        )
        .await;
        assert!(early.is_err());
        assert_eq!(store.cart_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_redirect_before_both_delays() {
        let mut store = store_with_item();
        let mut navigated = false;

        let result = tokio::time::timeout(
            Duration::from_secs(4),
            CompletionEffects::default().run(&mut store, |_| navigated = true),
        )
        .await;

        assert!(result.is_err());
        assert!(!navigated);
        assert_eq!(store.cart_count(), 0);
    }
}
