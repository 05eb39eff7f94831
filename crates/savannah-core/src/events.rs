//! # Cart Events
//!
//! What a cart session tells the outside world, and the two seams it tells
//! them through.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartSession ──► NotificationSink ──► toast: "Item removed"            │
//! │        │                                                                │
//! │        └────────► CheckoutHandoff ───► billing page                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both traits are implemented for `Vec<_>` so a session can be driven
//! without any real UI attached.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::checkout::CheckoutTotals;
use crate::money::Money;
use crate::types::Currency;

// =============================================================================
// Events
// =============================================================================

/// A user-visible change in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CartEvent {
    ItemAdded { name: String, quantity: i64 },

    ItemRemoved { name: String },

    CartCleared { items_removed: i64 },

    CheckoutStarted { total_items: i64, total_amount: Money },

    /// Checkout was attempted with nothing in the cart.
    CheckoutRejected,
}

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    #[default]
    Default,
    /// Something the user has to correct.
    Destructive,
}

/// A rendered toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    fn new(title: &str, description: String) -> Self {
        Notification {
            title: title.to_string(),
            description,
            variant: NotificationVariant::Default,
        }
    }

    fn destructive(title: &str, description: String) -> Self {
        Notification {
            variant: NotificationVariant::Destructive,
            ..Notification::new(title, description)
        }
    }
}

impl CartEvent {
    /// The toast shown for this event.
    ///
    /// ## Example
    /// ```rust
    /// use savannah_core::events::CartEvent;
    /// use savannah_core::money::Money;
    /// use savannah_core::types::Currency;
    ///
    /// let event = CartEvent::CheckoutStarted {
    ///     total_items: 3,
    ///     total_amount: Money::from_units(12_500),
    /// };
    /// let toast = event.notification(&Currency::kes());
    /// assert_eq!(toast.description, "Processing 3 items worth KES 12,500");
    /// ```
    pub fn notification(&self, currency: &Currency) -> Notification {
        match self {
            CartEvent::ItemAdded { name, quantity } => Notification::new(
                "Added to cart",
                format!("{} ({}) added to your cart", name, quantity),
            ),
            CartEvent::ItemRemoved { name } => Notification::new(
                "Item removed",
                format!("{} has been removed from your cart", name),
            ),
            CartEvent::CartCleared { .. } => Notification::new(
                "Cart cleared",
                "All items have been removed from your cart".to_string(),
            ),
            CartEvent::CheckoutStarted {
                total_items,
                total_amount,
            } => Notification::new(
                "Proceeding to checkout!",
                format!(
                    "Processing {} items worth {}",
                    total_items,
                    total_amount.format(currency)
                ),
            ),
            CartEvent::CheckoutRejected => Notification::destructive(
                "Cart is empty",
                "Add some items to your cart before checking out".to_string(),
            ),
        }
    }
}

// =============================================================================
// Checkout Handoff
// =============================================================================

/// Finalized figures handed over when the user proceeds to checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub total_items: i64,
    pub total_amount: Money,
    pub totals: CheckoutTotals,
}

// =============================================================================
// Collaborator Traits
// =============================================================================

/// Receives user-facing cart events.
pub trait NotificationSink {
    fn notify(&mut self, event: &CartEvent);
}

/// Takes over once checkout has been requested.
///
/// Implementations navigate, call a payment backend, and so on. The session
/// has already validated that the cart is not empty.
pub trait CheckoutHandoff {
    fn checkout_requested(&mut self, request: CheckoutRequest);
}

impl NotificationSink for Vec<CartEvent> {
    fn notify(&mut self, event: &CartEvent) {
        self.push(event.clone());
    }
}

impl CheckoutHandoff for Vec<CheckoutRequest> {
    fn checkout_requested(&mut self, request: CheckoutRequest) {
        self.push(request);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
