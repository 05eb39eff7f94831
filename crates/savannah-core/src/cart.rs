//! # Cart Ledger
//!
//! The authoritative in-memory list of line items for one shopping session.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  User Action              Ledger Call               Cart Change         │
//! │  ───────────              ───────────               ───────────         │
//! │                                                                         │
//! │  Add to cart ────────────► add_item() ────────────► merge or push       │
//! │                                                                         │
//! │  +/- / type quantity ────► update_quantity() ─────► qty = n (n ≥ 1)    │
//! │                                                     n ≤ 0: nothing      │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_item() ─────────► items.remove(i)    │
//! │                                                                         │
//! │  Clear Cart ─────────────► clear() ───────────────► items.clear()      │
//! │                                                                         │
//! │  NOTE: Every call is total. Unknown ids and quantities below 1 leave   │
//! │        the cart exactly as it was.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `id` (adding the same product increases quantity)
//! - Every quantity is ≥ 1
//! - `total_price == unit_price × quantity` for every line, always
//!
//! ## Example
//! ```rust
//! use savannah_core::cart::CartLedger;
//! use savannah_core::money::Money;
//! use savannah_core::types::Product;
//!
//! let maize = Product {
//!     id: "maize-90kg".to_string(),
//!     name: "White Maize".to_string(),
//!     price: Money::from_units(4000),
//!     category: "Grains & Cereals".to_string(),
//!     unit_of_measure: "90kg bag".to_string(),
//!     supplier: None,
//! };
//!
//! let mut ledger = CartLedger::new();
//! ledger.add_item(&maize, 2);
//! ledger.add_item(&maize, 3);
//!
//! let cart = ledger.update_quantity("maize-90kg", 0); // ignored
//! assert_eq!(cart.total_items(), 5);
//! assert_eq!(cart.total_amount().units(), 20_000);
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Design Notes
/// - `id` is the product id, so it never changes while the line exists.
/// - `product` is a copy of the catalog entry taken when the line was
///   created. Later catalog edits do not reach it.
/// - `unit_price` is frozen at add time for the same reason.
/// - Fields are private. The only way to change `quantity` is
///   `set_quantity`, which recomputes `total_price` in the same step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: String,
    product: Product,
    quantity: i64,
    unit_price: Money,
    total_price: Money,
    #[ts(as = "String")]
    added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line from a product, freezing its current price.
    fn from_product(product: &Product, quantity: i64) -> Self {
        let unit_price = product.price();
        LineItem {
            id: product.id.clone(),
            product: product.clone(),
            quantity,
            unit_price,
            total_price: unit_price.multiply_quantity(quantity),
            added_at: Utc::now(),
        }
    }

    fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity;
        self.total_price = self.unit_price.multiply_quantity(quantity);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Catalog snapshot taken when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// `unit_price × quantity`.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The ordered line items of one session.
///
/// Read-only from the outside. All changes go through [`CartLedger`].
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[ts(as = "String")]
    id: Uuid,
    items: Vec<LineItem>,
    /// Sum of quantities, refreshed on every mutation.
    total_items: i64,
    /// Sum of line totals, refreshed on every mutation.
    total_amount: Money,
    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            id: Uuid::new_v4(),
            items: Vec::new(),
            total_items: 0,
            total_amount: Money::zero(),
            created_at: Utc::now(),
        }
    }

    /// Session cart id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Items in the order they were first added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    /// Sum of line totals (the subtotal before shipping and VAT).
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    fn refresh_totals(&mut self) {
        self.total_items = self
            .items
            .iter()
            .fold(0_i64, |acc, i| acc.saturating_add(i.quantity));
        self.total_amount = self.items.iter().map(|i| i.total_price).sum();
    }

    /// Number of distinct lines.
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from(self)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart aggregates for client responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub unique_items: usize,
    pub total_items: i64,
    pub total_amount: Money,
}

impl From<&Cart> for CartSummary {
    fn from(cart: &Cart) -> Self {
        CartSummary {
            unique_items: cart.unique_items(),
            total_items: cart.total_items(),
            total_amount: cart.total_amount(),
        }
    }
}

// =============================================================================
// Cart Ledger
// =============================================================================

/// Owns a [`Cart`] and applies every mutation to it.
///
/// One ledger per user session. It is a plain value: pass it by `&mut` to
/// whatever handles the user's actions.
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    cart: Cart,
}

impl CartLedger {
    /// Creates a ledger around a new empty cart.
    pub fn new() -> Self {
        CartLedger { cart: Cart::new() }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds a product, or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - Quantity below 1 is treated as 1 (pass 1 for a single unit)
    /// - Product already in cart: quantity increases, original price kept
    /// - Product not in cart: new line appended with the current price
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> &Cart {
        let quantity = quantity.max(1);

        if let Some(item) = self.cart.items.iter_mut().find(|i| i.id == product.id) {
            let merged = item.quantity.saturating_add(quantity);
            item.set_quantity(merged);
        } else {
            self.cart
                .items
                .push(LineItem::from_product(product, quantity));
        }

        self.cart.refresh_totals();
        &self.cart
    }

    /// Sets a line's quantity, reporting why nothing changed if it didn't.
    ///
    /// ## Errors
    /// - `InvalidQuantity` when `quantity < 1`
    /// - `ItemNotFound` when no line has this id
    pub fn try_update_quantity(&mut self, item_id: &str, quantity: i64) -> CartResult<&Cart> {
        validate_quantity(quantity)?;

        let item = self
            .cart
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id.to_string()))?;
        item.set_quantity(quantity);
        self.cart.refresh_totals();

        Ok(&self.cart)
    }

    /// Sets a line's quantity.
    ///
    /// Quantities below 1 and unknown ids leave the cart unchanged. Removal
    /// is [`CartLedger::remove_item`], never a zero quantity.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> &Cart {
        let _ = self.try_update_quantity(item_id, quantity);
        &self.cart
    }

    /// The "+" button.
    pub fn increment_quantity(&mut self, item_id: &str) -> &Cart {
        let current = self.cart.item(item_id).map(LineItem::quantity);
        match current {
            Some(current) => self.update_quantity(item_id, current.saturating_add(1)),
            None => &self.cart,
        }
    }

    /// The "-" button. At quantity 1 this does nothing.
    pub fn decrement_quantity(&mut self, item_id: &str) -> &Cart {
        let current = self.cart.item(item_id).map(LineItem::quantity);
        match current {
            Some(current) => self.update_quantity(item_id, current - 1),
            None => &self.cart,
        }
    }

    /// Removes a line and returns it.
    ///
    /// ## Errors
    /// - `ItemNotFound` when no line has this id
    pub fn try_remove_item(&mut self, item_id: &str) -> CartResult<LineItem> {
        let index = self
            .cart
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| CartError::ItemNotFound(item_id.to_string()))?;
        let removed = self.cart.items.remove(index);
        self.cart.refresh_totals();
        Ok(removed)
    }

    /// Removes a line if present.
    pub fn remove_item(&mut self, item_id: &str) -> &Cart {
        let _ = self.try_remove_item(item_id);
        &self.cart
    }

    /// Removes every line.
    pub fn clear(&mut self) -> &Cart {
        self.cart.items.clear();
        self.cart.refresh_totals();
        self.cart.created_at = Utc::now();
        &self.cart
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn test_product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_units(price),
            category: "Grains & Cereals".to_string(),
            unit_of_measure: "90kg bag".to_string(),
            supplier: None,
        }
    }

    fn assert_consistent(cart: &Cart) {
        let expected: i64 = cart
            .items()
            .iter()
            .map(|i| i.unit_price().units() * i.quantity())
            .sum();
        assert_eq!(cart.total_amount().units(), expected);
        let quantities: i64 = cart.items().iter().map(LineItem::quantity).sum();
        assert_eq!(cart.total_items(), quantities);

        let ids: HashSet<&str> = cart.items().iter().map(LineItem::id).collect();
        assert_eq!(ids.len(), cart.items().len());

        for item in cart.items() {
            assert!(item.quantity() >= 1);
            assert_eq!(item.total_price(), item.unit_price() * item.quantity());
        }
    }

    #[test]
    fn test_add_item() {
        let mut ledger = CartLedger::new();
        let product = test_product("1", 999);

        let cart = ledger.add_item(&product, 2);

        assert_eq!(cart.unique_items(), 1);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_amount().units(), 1998);
    }

    #[test]
    fn test_add_same_product_merges() {
        let mut ledger = CartLedger::new();
        let product = test_product("1", 1000);

        ledger.add_item(&product, 2);
        let cart = ledger.add_item(&product, 3);

        assert_eq!(cart.unique_items(), 1);
        assert_eq!(cart.items()[0].quantity(), 5);
        assert_eq!(cart.items()[0].total_price().units(), 5000);
    }

    #[test]
    fn test_add_clamps_quantity_to_one() {
        let mut ledger = CartLedger::new();
        let product = test_product("1", 100);

        ledger.add_item(&product, 0);
        assert_eq!(ledger.cart().total_items(), 1);

        ledger.add_item(&product, -4);
        assert_eq!(ledger.cart().total_items(), 2);
    }

    #[test]
    fn test_price_frozen_at_add_time() {
        let mut ledger = CartLedger::new();
        let mut product = test_product("1", 1000);

        ledger.add_item(&product, 1);
        product.price = Money::from_units(1500);
        product.name = "Renamed".to_string();
        let cart = ledger.add_item(&product, 1);

        let item = &cart.items()[0];
        assert_eq!(item.unit_price().units(), 1000);
        assert_eq!(item.total_price().units(), 2000);
        assert_eq!(item.name(), "Product 1");
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("b", 1), 1);
        ledger.add_item(&test_product("a", 1), 1);
        ledger.add_item(&test_product("b", 1), 1);

        let ids: Vec<&str> = ledger.cart().items().iter().map(LineItem::id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_update_quantity() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 250), 1);

        let cart = ledger.update_quantity("1", 4);

        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.items()[0].total_price().units(), 1000);
    }

    #[test]
    fn test_update_to_zero_or_negative_is_noop() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 250), 3);
        let before = ledger.cart().items().to_vec();

        ledger.update_quantity("1", 0);
        assert_eq!(ledger.cart().items(), before.as_slice());

        ledger.update_quantity("1", -1);
        assert_eq!(ledger.cart().items(), before.as_slice());
    }

    #[test]
    fn test_try_update_reports_reason() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 250), 1);

        assert_eq!(
            ledger.try_update_quantity("1", 0).unwrap_err(),
            CartError::InvalidQuantity { quantity: 0 }
        );
        assert_eq!(
            ledger.try_update_quantity("missing", 2).unwrap_err(),
            CartError::ItemNotFound("missing".to_string())
        );
        assert!(ledger.try_update_quantity("1", 2).is_ok());
    }

    #[test]
    fn test_update_unknown_item_is_noop() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 250), 1);

        let cart = ledger.update_quantity("missing", 9);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 100), 1);

        ledger.increment_quantity("1");
        ledger.increment_quantity("1");
        assert_eq!(ledger.cart().total_items(), 3);

        ledger.decrement_quantity("1");
        ledger.decrement_quantity("1");
        ledger.decrement_quantity("1");
        assert_eq!(ledger.cart().total_items(), 1);
        assert_eq!(ledger.cart().unique_items(), 1);

        ledger.increment_quantity("missing");
        assert_eq!(ledger.cart().unique_items(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 100), 1);
        ledger.add_item(&test_product("2", 200), 2);

        let cart = ledger.remove_item("1");
        assert_eq!(cart.unique_items(), 1);
        assert_eq!(cart.total_amount().units(), 400);
    }

    #[test]
    fn test_remove_unknown_item_is_noop() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 100), 2);
        let before = ledger.cart().items().to_vec();

        ledger.remove_item("missing");
        assert_eq!(ledger.cart().items(), before.as_slice());

        assert_eq!(
            ledger.try_remove_item("missing").unwrap_err(),
            CartError::ItemNotFound("missing".to_string())
        );
    }

    #[test]
    fn test_try_remove_returns_line() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 100), 2);

        let removed = ledger.try_remove_item("1").unwrap();
        assert_eq!(removed.name(), "Product 1");
        assert_eq!(removed.quantity(), 2);
        assert!(ledger.cart().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 999), 2);
        ledger.add_item(&test_product("2", 10), 7);
        let id = ledger.cart().id();

        let cart = ledger.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_amount().is_zero());
        assert_eq!(cart.id(), id);

        // Clearing an empty cart is fine too
        assert!(ledger.clear().is_empty());
    }

    #[test]
    fn test_totals_consistent_over_operation_sequence() {
        let products = [
            test_product("maize", 4000),
            test_product("beans", 6500),
            test_product("seed", 375),
        ];
        let mut ledger = CartLedger::new();

        // Small LCG so the sequence is fixed but varied
        let mut state: u64 = 0x5eed;
        let mut next = || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 33) as i64
        };

        for _ in 0..500 {
            let op = next() % 5;
            let product = &products[(next() % 3) as usize];
            let qty = next() % 7 - 2; // -2..=4

            match op {
                0 | 1 => {
                    ledger.add_item(product, qty);
                }
                2 => {
                    ledger.update_quantity(&product.id, qty);
                }
                3 => {
                    ledger.remove_item(&product.id);
                }
                _ => {
                    ledger.decrement_quantity(&product.id);
                }
            }
            assert_consistent(ledger.cart());
        }
    }

    #[test]
    fn test_serialized_shape() {
        let mut ledger = CartLedger::new();
        ledger.add_item(&test_product("1", 1200), 2);

        let json = serde_json::to_value(ledger.cart()).unwrap();
        let item = &json["items"][0];
        assert_eq!(item["id"], "1");
        assert_eq!(item["quantity"], 2);
        assert_eq!(item["unitPrice"], 1200);
        assert_eq!(item["totalPrice"], 2400);
        assert_eq!(item["product"]["unit_of_measure"], "90kg bag");

        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["totalAmount"], 2400);

        let summary = serde_json::to_value(ledger.cart().summary()).unwrap();
        assert_eq!(summary["totalItems"], 2);
        assert_eq!(summary["totalAmount"], 2400);
        assert_eq!(summary["uniqueItems"], 1);
    }
}
