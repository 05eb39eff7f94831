//! # Checkout Totals
//!
//! Turns a cart subtotal into the order summary: shipping, VAT, grand total.
//!
//! ## Order Summary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Subtotal (3 items)                              KES 4,000              │
//! │  Shipping                                        KES 300                │
//! │  💡 Add KES 1,000 more for free shipping                                │
//! │  VAT (16%)                                       KES 640                │
//! │  ──────────────────────────────────────────────────────────             │
//! │  Total                                           KES 4,940              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - `shipping = subtotal > threshold ? 0 : fee` (strictly above)
//! - `tax = round_half_up(subtotal × rate)`; shipping is not taxed
//! - `grand_total = subtotal + shipping + tax`
//!
//! ## Example
//! ```rust
//! use savannah_core::checkout::{CheckoutPolicy, CheckoutTotals};
//! use savannah_core::money::Money;
//!
//! let totals = CheckoutTotals::from_subtotal(Money::from_units(6000), &CheckoutPolicy::default());
//! assert!(totals.shipping.is_zero());
//! assert_eq!(totals.tax.units(), 960);
//! assert_eq!(totals.grand_total.units(), 6960);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::TaxRate;

/// Free shipping applies to subtotals above this (KES).
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Money = Money::from_units(5000);

/// Flat shipping fee below the threshold (KES).
pub const DEFAULT_SHIPPING_FEE: Money = Money::from_units(300);

/// Kenyan VAT, 16%.
pub const DEFAULT_VAT_RATE: TaxRate = TaxRate::from_bps(1600);

// =============================================================================
// Checkout Policy
// =============================================================================

/// The shipping and tax parameters checkout totals are computed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPolicy {
    pub free_shipping_threshold: Money,
    pub shipping_fee: Money,
    pub tax_rate: TaxRate,
}

impl CheckoutPolicy {
    pub fn new(free_shipping_threshold: Money, shipping_fee: Money, tax_rate: TaxRate) -> Self {
        CheckoutPolicy {
            free_shipping_threshold,
            shipping_fee,
            tax_rate,
        }
    }

    /// Totals for a cart under this policy.
    pub fn totals(&self, cart: &Cart) -> CheckoutTotals {
        CheckoutTotals::from_subtotal(cart.total_amount(), self)
    }
}

impl Default for CheckoutPolicy {
    /// KES 5,000 free-shipping threshold, KES 300 fee, 16% VAT.
    fn default() -> Self {
        CheckoutPolicy::new(
            DEFAULT_FREE_SHIPPING_THRESHOLD,
            DEFAULT_SHIPPING_FEE,
            DEFAULT_VAT_RATE,
        )
    }
}

// =============================================================================
// Checkout Totals
// =============================================================================

/// The order summary figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutTotals {
    /// Cart total amount.
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub grand_total: Money,
    /// How much more to add for free shipping, while the subtotal is
    /// strictly below the threshold.
    pub free_shipping_remaining: Option<Money>,
}

impl CheckoutTotals {
    /// Applies the checkout rules to a subtotal.
    pub fn from_subtotal(subtotal: Money, policy: &CheckoutPolicy) -> Self {
        let shipping = if subtotal > policy.free_shipping_threshold {
            Money::zero()
        } else {
            policy.shipping_fee
        };
        let tax = subtotal.calculate_tax(policy.tax_rate);

        // At exactly the threshold neither free shipping nor the hint applies
        let free_shipping_remaining = (subtotal < policy.free_shipping_threshold)
            .then(|| policy.free_shipping_threshold - subtotal);

        CheckoutTotals {
            subtotal,
            shipping,
            tax,
            grand_total: subtotal + shipping + tax,
            free_shipping_remaining,
        }
    }

    /// True when no shipping fee is charged.
    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Computes checkout totals for a cart from explicit parameters.
///
/// Pure: the cart is only read.
///
/// ## Example
/// ```rust
/// use savannah_core::cart::Cart;
/// use savannah_core::checkout::compute_checkout_totals;
/// use savannah_core::money::Money;
/// use savannah_core::types::TaxRate;
///
/// let totals = compute_checkout_totals(
///     &Cart::new(),
///     Money::from_units(5000),
///     Money::from_units(300),
///     TaxRate::from_fraction(0.16),
/// );
/// assert_eq!(totals.grand_total.units(), 300);
/// ```
pub fn compute_checkout_totals(
    cart: &Cart,
    free_shipping_threshold: Money,
    shipping_fee: Money,
    tax_rate: TaxRate,
) -> CheckoutTotals {
    CheckoutPolicy::new(free_shipping_threshold, shipping_fee, tax_rate).totals(cart)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLedger;
    use crate::types::Product;

    fn cart_worth(amount: i64) -> CartLedger {
        let mut ledger = CartLedger::new();
        ledger.add_item(
            &Product {
                id: "bundle".to_string(),
                name: "Bundle".to_string(),
                price: Money::from_units(amount),
                category: "Mixed".to_string(),
                unit_of_measure: "bundle".to_string(),
                supplier: None,
            },
            1,
        );
        ledger
    }

    fn totals(amount: i64) -> CheckoutTotals {
        let ledger = cart_worth(amount);
        compute_checkout_totals(
            ledger.cart(),
            Money::from_units(5000),
            Money::from_units(300),
            TaxRate::from_fraction(0.16),
        )
    }

    #[test]
    fn test_below_threshold_pays_shipping() {
        let t = totals(4000);
        assert_eq!(t.subtotal.units(), 4000);
        assert_eq!(t.shipping.units(), 300);
        assert_eq!(t.tax.units(), 640);
        assert_eq!(t.grand_total.units(), 4940);
        assert_eq!(t.free_shipping_remaining, Some(Money::from_units(1000)));
        assert!(!t.qualifies_for_free_shipping());
    }

    #[test]
    fn test_above_threshold_ships_free() {
        let t = totals(6000);
        assert!(t.shipping.is_zero());
        assert_eq!(t.tax.units(), 960);
        assert_eq!(t.grand_total.units(), 6960);
        assert_eq!(t.free_shipping_remaining, None);
        assert!(t.qualifies_for_free_shipping());
    }

    #[test]
    fn test_exactly_at_threshold() {
        let t = totals(5000);
        assert_eq!(t.shipping.units(), 300);
        assert_eq!(t.free_shipping_remaining, None);
        assert_eq!(t.grand_total.units(), 5000 + 300 + 800);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 1234 × 0.16 = 197.44 → 197
        assert_eq!(totals(1234).tax.units(), 197);
        // 1237 × 0.16 = 197.92 → 198
        assert_eq!(totals(1237).tax.units(), 198);

        let t = CheckoutTotals::from_subtotal(
            Money::from_units(25),
            &CheckoutPolicy::new(Money::zero(), Money::zero(), TaxRate::from_bps(1000)),
        );
        // 25 × 10% = 2.5 → 3
        assert_eq!(t.tax.units(), 3);
    }

    #[test]
    fn test_policy_default_matches_marketplace() {
        let policy = CheckoutPolicy::default();
        assert_eq!(policy.free_shipping_threshold.units(), 5000);
        assert_eq!(policy.shipping_fee.units(), 300);
        assert_eq!(policy.tax_rate.bps(), 1600);

        let ledger = cart_worth(4000);
        assert_eq!(policy.totals(ledger.cart()), totals(4000));
    }
}
