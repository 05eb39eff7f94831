//! # Domain Types
//!
//! Catalog-facing types used throughout the cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Supplier     │   │    Currency     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  name           │   │  code  (KES)    │       │
//! │  │  name           │   └─────────────────┘   │  symbol         │       │
//! │  │  price (Money)  │                         │  decimals (0)   │       │
//! │  │  category       │   ┌─────────────────┐   └─────────────────┘       │
//! │  │  unit_of_measure│   │    TaxRate      │                             │
//! │  │  supplier?      │   │  bps (u32)      │                             │
//! │  └─────────────────┘   │  1600 = 16% VAT │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are owned by the catalog. The cart only ever holds a read-only
//! copy taken when the item was added.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Shown when a product has no supplier attached.
pub const FALLBACK_SUPPLIER_NAME: &str = "Local Supplier";

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1600 bps = 16% (Kenyan VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a fraction such as `0.16`.
    ///
    /// Negative or non-finite input yields zero.
    pub fn from_fraction(fraction: f64) -> Self {
        if !fraction.is_finite() || fraction <= 0.0 {
            return TaxRate::zero();
        }
        TaxRate((fraction * 10000.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Currency
// =============================================================================

/// Most digits a currency may show after the decimal point.
pub const MAX_CURRENCY_DECIMALS: u8 = 6;

/// Display settings for the currency prices are shown in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 code.
    pub code: String,

    /// Prefix shown before amounts.
    pub symbol: String,

    /// Digits after the decimal point in the smallest unit.
    /// KES prices are whole shillings, so 0. At most
    /// [`MAX_CURRENCY_DECIMALS`].
    pub decimals: u8,
}

impl Currency {
    /// Creates a currency. `decimals` is capped at [`MAX_CURRENCY_DECIMALS`].
    pub fn new(code: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Currency {
            code: code.into(),
            symbol: symbol.into(),
            decimals: decimals.min(MAX_CURRENCY_DECIMALS),
        }
    }

    /// Kenyan shilling, whole units.
    pub fn kes() -> Self {
        Currency::new("KES", "KES", 0)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::kes()
    }
}

// =============================================================================
// Supplier
// =============================================================================

/// The marketplace vendor offering a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Supplier {
    /// Display name shown under the product ("by ...").
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product as supplied by the catalog.
///
/// Field names follow the catalog's snake_case wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog identifier. Also identifies the product's cart line.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Current price in smallest currency units.
    pub price: Money,

    /// Marketplace category, e.g. "Grains & Cereals".
    pub category: String,

    /// What one unit of quantity means, e.g. "90kg bag".
    pub unit_of_measure: String,

    /// Vendor, when known.
    #[serde(default)]
    pub supplier: Option<Supplier>,
}

impl Product {
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Supplier name, or [`FALLBACK_SUPPLIER_NAME`] when none is attached.
    pub fn supplier_display_name(&self) -> &str {
        self.supplier
            .as_ref()
            .map(|s| s.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(FALLBACK_SUPPLIER_NAME)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn maize() -> Product {
        Product {
            id: "maize-90kg".to_string(),
            name: "White Maize".to_string(),
            price: Money::from_units(4000),
            category: "Grains & Cereals".to_string(),
            unit_of_measure: "90kg bag".to_string(),
            supplier: Some(Supplier {
                name: "Rift Valley Growers".to_string(),
            }),
        }
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1600);
        assert_eq!(rate.bps(), 1600);
    }

    #[test]
    fn test_tax_rate_from_fraction() {
        assert_eq!(TaxRate::from_fraction(0.16).bps(), 1600);
        assert_eq!(TaxRate::from_fraction(0.0825).bps(), 825);
        assert!(TaxRate::from_fraction(-0.1).is_zero());
        assert!(TaxRate::from_fraction(f64::NAN).is_zero());
    }

    #[test]
    fn test_supplier_display_name() {
        let mut product = maize();
        assert_eq!(product.supplier_display_name(), "Rift Valley Growers");

        product.supplier = None;
        assert_eq!(product.supplier_display_name(), FALLBACK_SUPPLIER_NAME);

        product.supplier = Some(Supplier {
            name: "  ".to_string(),
        });
        assert_eq!(product.supplier_display_name(), FALLBACK_SUPPLIER_NAME);
    }

    #[test]
    fn test_product_catalog_json() {
        let json = r#"{
            "id": "beans-50kg",
            "name": "Rosecoco Beans",
            "price": 6500,
            "category": "Legumes",
            "unit_of_measure": "50kg bag"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price().units(), 6500);
        assert!(product.supplier.is_none());
    }

    #[test]
    fn test_currency_default_is_kes() {
        let currency = Currency::default();
        assert_eq!(currency.code, "KES");
        assert_eq!(currency.decimals, 0);
    }
}
