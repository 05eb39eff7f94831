//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer smallest denomination                            │
//! │    KES prices are whole shillings: 4000 × 16% = 640 exactly            │
//! │    Anything fractional is rounded once, explicitly, half-up            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use savannah_core::money::Money;
//!
//! let price = Money::from_units(1200); // KES 1,200
//!
//! let doubled = price * 2;                      // KES 2,400
//! let total = price + Money::from_units(300);   // KES 1,500
//! assert_eq!(doubled.units(), 2400);
//! assert_eq!(total.units(), 1500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::{Currency, TaxRate, MAX_CURRENCY_DECIMALS};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest displayed currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences such as "amount left for free shipping"
///   are computed as Money too
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as a bare number**: `{"unitPrice": 1200}` on the wire
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► LineItem.unit_price ──► LineItem.total_price         │
/// │                                                                         │
/// │  Cart.total_amount ──► shipping + VAT ──► CheckoutTotals.grand_total    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from smallest currency units.
    ///
    /// ## Example
    /// ```rust
    /// use savannah_core::money::Money;
    ///
    /// let price = Money::from_units(4000);
    /// assert_eq!(price.units(), 4000);
    /// ```
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the value in smallest currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax, rounding half-up to the nearest whole unit.
    ///
    /// ## Implementation
    /// Integer math: `floor((amount * bps + 5000) / 10000)`.
    /// The +5000 is half of the 10000 basis-point scale. Flooring (rather
    /// than truncating toward zero) keeps the rounding half-up for negative
    /// amounts as well.
    ///
    /// ## Example
    /// ```rust
    /// use savannah_core::money::Money;
    /// use savannah_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_units(4000);
    /// let vat = TaxRate::from_bps(1600); // 16%
    /// assert_eq!(subtotal.calculate_tax(vat).units(), 640);
    ///
    /// // 1 × 50% = 0.5 → 1
    /// assert_eq!(Money::from_units(1).calculate_tax(TaxRate::from_bps(5000)).units(), 1);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so large carts cannot overflow the intermediate product
        let scaled = self.0 as i128 * rate.bps() as i128 + 5000;
        let tax = scaled.div_euclid(10000);
        Money::from_units(i64::try_from(tax).unwrap_or(if tax < 0 { i64::MIN } else { i64::MAX }))
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    ///
    /// ## Example
    /// ```rust
    /// use savannah_core::money::Money;
    ///
    /// let unit_price = Money::from_units(350);
    /// assert_eq!(unit_price.multiply_quantity(3).units(), 1050);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount for display in the given currency.
    ///
    /// Thousands are grouped with commas, matching how the storefront shows
    /// prices (`KES 4,940`).
    ///
    /// ## Example
    /// ```rust
    /// use savannah_core::money::Money;
    /// use savannah_core::types::Currency;
    ///
    /// let kes = Currency::kes();
    /// assert_eq!(Money::from_units(4940).format(&kes), "KES 4,940");
    ///
    /// let usd = Currency::new("USD", "$", 2);
    /// assert_eq!(Money::from_units(123456).format(&usd), "$1,234.56");
    /// ```
    pub fn format(&self, currency: &Currency) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        // Currency fields are public; re-apply the cap
        let decimals = currency.decimals.min(MAX_CURRENCY_DECIMALS);
        let divisor = 10_u64.pow(u32::from(decimals));
        let whole = group_thousands(magnitude / divisor);

        let number = if decimals > 0 {
            format!(
                "{}.{:0width$}",
                whole,
                magnitude % divisor,
                width = usize::from(decimals)
            )
        } else {
            whole
        };

        if currency.symbol.chars().all(|c| c.is_alphabetic()) {
            // Alphabetic codes like "KES" read better with a space
            format!("{}{} {}", sign, currency.symbol, number)
        } else {
            format!("{}{}{}", sign, currency.symbol, number)
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the marketplace's default currency (KES).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&Currency::default()))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(1099);
        assert_eq!(money.units(), 1099);
    }

    #[test]
    fn test_display_defaults_to_kes() {
        assert_eq!(format!("{}", Money::from_units(4000)), "KES 4,000");
        assert_eq!(format!("{}", Money::from_units(0)), "KES 0");
        assert_eq!(format!("{}", Money::from_units(-300)), "-KES 300");
        assert_eq!(format!("{}", Money::from_units(1_234_567)), "KES 1,234,567");
    }

    #[test]
    fn test_format_with_decimals() {
        let usd = Currency::new("USD", "$", 2);
        assert_eq!(Money::from_units(1099).format(&usd), "$10.99");
        assert_eq!(Money::from_units(5).format(&usd), "$0.05");
        assert_eq!(Money::from_units(-550).format(&usd), "-$5.50");
    }

    #[test]
    fn test_format_caps_decimals() {
        let wide = Currency::new("X", "X", 20);
        assert_eq!(wide.decimals, MAX_CURRENCY_DECIMALS);
        assert_eq!(Money::from_units(5).format(&wide), "X 0.000005");

        let raw = Currency {
            code: "X".to_string(),
            symbol: "X".to_string(),
            decimals: u8::MAX,
        };
        assert_eq!(Money::from_units(1_500_000).format(&raw), "X 1.500000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((a * 3).units(), 3000);

        let mut c = a;
        c += b;
        c -= Money::from_units(100);
        assert_eq!(c.units(), 1400);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_units(100), Money::from_units(250)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.units(), 350);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_vat_examples() {
        let vat = TaxRate::from_bps(1600);
        assert_eq!(Money::from_units(4000).calculate_tax(vat).units(), 640);
        assert_eq!(Money::from_units(6000).calculate_tax(vat).units(), 960);
        assert_eq!(Money::from_units(0).calculate_tax(vat).units(), 0);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        let vat = TaxRate::from_bps(1600);
        // 3 × 0.16 = 0.48 → 0
        assert_eq!(Money::from_units(3).calculate_tax(vat).units(), 0);
        // 4 × 0.16 = 0.64 → 1
        assert_eq!(Money::from_units(4).calculate_tax(vat).units(), 1);

        let half = TaxRate::from_bps(5000);
        // 0.5 → 1, 1.5 → 2, 2.5 → 3 (half-up, not half-even)
        assert_eq!(Money::from_units(1).calculate_tax(half).units(), 1);
        assert_eq!(Money::from_units(3).calculate_tax(half).units(), 2);
        assert_eq!(Money::from_units(5).calculate_tax(half).units(), 3);
        // -0.5 → 0 (towards +∞)
        assert_eq!(Money::from_units(-1).calculate_tax(half).units(), 0);
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let price = Money::from_units(i64::MAX / 2);
        assert_eq!(price.multiply_quantity(3).units(), i64::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert!(!Money::from_units(100).is_negative());
        assert!(Money::from_units(-100).is_negative());
    }
}
