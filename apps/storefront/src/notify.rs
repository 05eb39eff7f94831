//! # Notifications and Checkout Handoff
//!
//! The storefront's implementations of the two session seams.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartEvent ──► ToastQueue ──► tracing (info!/warn!)                     │
//! │                    └─────────► drained into the next response          │
//! │                                                                         │
//! │  CheckoutRequest ──► BillingRedirect ──► tokio task                     │
//! │                                           sleep(delay) → "/billing"     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use savannah_core::{
    CartEvent, CheckoutHandoff, CheckoutRequest, Currency, Notification, NotificationSink,
    NotificationVariant,
};
use tokio::task::JoinHandle;
use tracing::{info, warn};

// =============================================================================
// Toast Queue
// =============================================================================

/// Renders cart events as toasts, logs them, and holds them for the client.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    currency: Currency,
    pending: Vec<Notification>,
}

impl ToastQueue {
    pub fn new(currency: Currency) -> Self {
        ToastQueue {
            currency,
            pending: Vec::new(),
        }
    }

    /// Takes every toast raised since the last drain.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, event: &CartEvent) {
        let toast = event.notification(&self.currency);
        match toast.variant {
            NotificationVariant::Default => {
                info!(title = %toast.title, description = %toast.description, "toast")
            }
            NotificationVariant::Destructive => {
                warn!(title = %toast.title, description = %toast.description, "toast")
            }
        }
        self.pending.push(toast);
    }
}

// =============================================================================
// Billing Redirect
// =============================================================================

/// Sends the user to the billing page a short moment after checkout starts,
/// long enough for the "Proceeding to checkout!" toast to be read.
#[derive(Debug)]
pub struct BillingRedirect {
    route: String,
    delay: Duration,
    pending: Vec<JoinHandle<String>>,
}

impl BillingRedirect {
    pub fn new(route: impl Into<String>, delay: Duration) -> Self {
        BillingRedirect {
            route: route.into(),
            delay,
            pending: Vec::new(),
        }
    }

    /// Redirects scheduled but not yet awaited.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Waits for every scheduled redirect and returns the routes taken.
    pub async fn settle(&mut self) -> Vec<String> {
        let mut routes = Vec::with_capacity(self.pending.len());
        for handle in self.pending.drain(..) {
            match handle.await {
                Ok(route) => routes.push(route),
                Err(e) => warn!(error = %e, "billing redirect task failed"),
            }
        }
        routes
    }
}

impl CheckoutHandoff for BillingRedirect {
    fn checkout_requested(&mut self, request: CheckoutRequest) {
        info!(
            total_items = request.total_items,
            total_amount = request.total_amount.units(),
            grand_total = request.totals.grand_total.units(),
            "proceeding to checkout"
        );

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(route = %self.route, "no async runtime, billing redirect skipped");
            return;
        };

        // Finished redirects have already been logged; keep only live ones
        self.pending.retain(|handle| !handle.is_finished());

        let route = self.route.clone();
        let delay = self.delay;
        self.pending.push(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            info!(route = %route, "redirecting to billing");
            route
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use savannah_core::{CheckoutPolicy, CheckoutTotals, Money};

    fn request() -> CheckoutRequest {
        let amount = Money::from_units(4000);
        CheckoutRequest {
            total_items: 2,
            total_amount: amount,
            totals: CheckoutTotals::from_subtotal(amount, &CheckoutPolicy::default()),
        }
    }

    #[test]
    fn test_toast_queue_drains() {
        let mut queue = ToastQueue::new(Currency::kes());
        queue.notify(&CartEvent::CheckoutRejected);
        queue.notify(&CartEvent::CartCleared { items_removed: 1 });

        let toasts = queue.drain();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].variant, NotificationVariant::Destructive);
        assert_eq!(toasts[1].title, "Cart cleared");
        assert!(queue.drain().is_empty());
    }

    #[tokio::test]
    async fn test_billing_redirect_after_delay() {
        let mut redirect = BillingRedirect::new("/billing", Duration::from_millis(5));
        redirect.checkout_requested(request());
        assert_eq!(redirect.pending(), 1);

        let routes = redirect.settle().await;
        assert_eq!(routes, vec!["/billing".to_string()]);
        assert_eq!(redirect.pending(), 0);
    }

    #[tokio::test]
    async fn test_finished_redirects_are_pruned() {
        let mut redirect = BillingRedirect::new("/billing", Duration::ZERO);
        for _ in 0..5 {
            redirect.checkout_requested(request());
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        assert_eq!(redirect.pending(), 1);
        assert_eq!(redirect.settle().await.len(), 1);
    }

    #[test]
    fn test_billing_redirect_without_runtime_is_skipped() {
        let mut redirect = BillingRedirect::new("/billing", Duration::ZERO);
        redirect.checkout_requested(request());
        assert_eq!(redirect.pending(), 0);
    }
}
