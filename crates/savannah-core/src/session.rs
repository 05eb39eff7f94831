//! # Cart Session
//!
//! The cart page's action handlers, one layer above the ledger.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartSession                                        │
//! │                                                                         │
//! │  User Action        Ledger Call          Emitted                        │
//! │  ───────────        ───────────          ───────                        │
//! │  add                add_item             ItemAdded                      │
//! │  quantity edit      update_quantity      (nothing)                      │
//! │  trash icon         try_remove_item      ItemRemoved (if it existed)    │
//! │  Clear Cart         clear                CartCleared (if not empty)     │
//! │  Checkout           (read only)          CheckoutStarted + handoff      │
//! │                                          or CheckoutRejected + error    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger knows nothing about notifications. Deciding what the user is
//! told, and refusing checkout on an empty cart, happens here.

use crate::cart::{Cart, CartLedger};
use crate::checkout::{CheckoutPolicy, CheckoutTotals};
use crate::error::{CartError, CartResult};
use crate::events::{CartEvent, CheckoutHandoff, CheckoutRequest, NotificationSink};
use crate::types::Product;
use crate::validation::parse_quantity_input;

/// One user's cart plus its collaborators.
#[derive(Debug)]
pub struct CartSession<N, H> {
    ledger: CartLedger,
    policy: CheckoutPolicy,
    notifier: N,
    handoff: H,
}

impl<N, H> CartSession<N, H>
where
    N: NotificationSink,
    H: CheckoutHandoff,
{
    /// Starts a session with an empty cart.
    pub fn new(policy: CheckoutPolicy, notifier: N, handoff: H) -> Self {
        CartSession {
            ledger: CartLedger::new(),
            policy,
            notifier,
            handoff,
        }
    }

    pub fn cart(&self) -> &Cart {
        self.ledger.cart()
    }

    pub fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn handoff(&self) -> &H {
        &self.handoff
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn handoff_mut(&mut self) -> &mut H {
        &mut self.handoff
    }

    /// Order summary for the current cart.
    pub fn totals(&self) -> CheckoutTotals {
        self.policy.totals(self.ledger.cart())
    }

    /// Adds a product and announces it.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> &Cart {
        let quantity = quantity.max(1);
        self.ledger.add_item(product, quantity);
        self.notifier.notify(&CartEvent::ItemAdded {
            name: product.name.clone(),
            quantity,
        });
        self.ledger.cart()
    }

    /// Sets a quantity. Values below 1 are ignored.
    pub fn change_quantity(&mut self, item_id: &str, quantity: i64) -> &Cart {
        self.ledger.update_quantity(item_id, quantity)
    }

    /// Sets a quantity from the raw text of the quantity field.
    ///
    /// See [`parse_quantity_input`] for how the text is read.
    pub fn set_quantity_from_input(&mut self, item_id: &str, raw: &str) -> &Cart {
        self.ledger.update_quantity(item_id, parse_quantity_input(raw))
    }

    pub fn increment(&mut self, item_id: &str) -> &Cart {
        self.ledger.increment_quantity(item_id)
    }

    pub fn decrement(&mut self, item_id: &str) -> &Cart {
        self.ledger.decrement_quantity(item_id)
    }

    /// Removes a line, announcing it only if it was in the cart.
    pub fn remove_item(&mut self, item_id: &str) -> &Cart {
        if let Ok(removed) = self.ledger.try_remove_item(item_id) {
            self.notifier.notify(&CartEvent::ItemRemoved {
                name: removed.name().to_string(),
            });
        }
        self.ledger.cart()
    }

    /// Empties a non-empty cart. An empty cart is left alone, silently.
    pub fn clear_cart(&mut self) -> &Cart {
        let items_removed = self.ledger.cart().total_items();
        if items_removed > 0 {
            self.ledger.clear();
            self.notifier
                .notify(&CartEvent::CartCleared { items_removed });
        }
        self.ledger.cart()
    }

    /// Hands the cart's totals to checkout.
    ///
    /// The cart itself is kept; the billing step decides when to clear it.
    ///
    /// ## Errors
    /// - `EmptyCart` when there is nothing to check out. The user is told
    ///   through a destructive notification and the handoff is not called.
    pub fn checkout(&mut self) -> CartResult<CheckoutRequest> {
        let cart = self.ledger.cart();
        let total_items = cart.total_items();
        if total_items == 0 {
            self.notifier.notify(&CartEvent::CheckoutRejected);
            return Err(CartError::EmptyCart);
        }

        let request = CheckoutRequest {
            total_items,
            total_amount: cart.total_amount(),
            totals: self.policy.totals(cart),
        };

        self.notifier.notify(&CartEvent::CheckoutStarted {
            total_items: request.total_items,
            total_amount: request.total_amount,
        });
        self.handoff.checkout_requested(request.clone());

        Ok(request)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
