//! # Validation Module
//!
//! Input validation utilities for catalog data and cart input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load (storefront app)                                │
//! │  ├── validate_product / validate_catalog                               │
//! │  └── Bad products are rejected before they can reach a cart            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart input                                                   │
//! │  ├── parse_quantity_input: raw text from the quantity field            │
//! │  └── validate_quantity: ≥ 1 or the update is a no-op                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use savannah_core::validation::{parse_quantity_input, validate_quantity};
//!
//! assert_eq!(parse_quantity_input("3"), 3);
//! assert!(validate_quantity(0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::{CartError, CartResult, ValidationError};
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted from the catalog.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

// =============================================================================
// Quantity
// =============================================================================

/// Checks a requested line quantity.
///
/// ## Rules
/// - Must be at least 1
///
/// Zero is not a synonym for removal; callers remove explicitly.
pub fn validate_quantity(qty: i64) -> CartResult<()> {
    if qty < 1 {
        return Err(CartError::InvalidQuantity { quantity: qty });
    }
    Ok(())
}

/// Interprets the raw contents of a quantity input field.
///
/// ## Rules
/// - Leading whitespace is skipped, then an optional sign and digits are read
/// - Anything after the leading integer is ignored (`"3 bags"` → 3)
/// - No digits, or a value of 0, becomes 1
/// - Negative values pass through so that the update is ignored downstream
/// - Values beyond the i64 range saturate
///
/// ## Example
/// ```rust
/// use savannah_core::validation::parse_quantity_input;
///
/// assert_eq!(parse_quantity_input(""), 1);
/// assert_eq!(parse_quantity_input("0"), 1);
/// assert_eq!(parse_quantity_input("12kg"), 12);
/// assert_eq!(parse_quantity_input("-2"), -2);
/// ```
pub fn parse_quantity_input(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 1;
    }

    let magnitude = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0_i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d)));

    match (negative, magnitude) {
        (_, 0) => 1,
        (true, m) => -m,
        (false, m) => m,
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Validates a price in smallest currency units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free samples)
pub fn validate_price(units: i64) -> ValidationResult<()> {
    if units < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }
    Ok(())
}

/// Validates one catalog product.
///
/// ## Rules
/// - `id`, `name`, and `unit_of_measure` must not be blank
/// - `name` is at most [`MAX_PRODUCT_NAME_LEN`] characters
/// - `price` must be non-negative
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    require("id", &product.id)?;
    require("name", &product.name)?;
    require("unit_of_measure", &product.unit_of_measure)?;

    if product.name.trim().chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    validate_price(product.price.units())
}

/// Validates a whole catalog: every product, and no repeated ids.
pub fn validate_catalog(products: &[Product]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        validate_product(product)?;
        if !seen.insert(product.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.clone(),
            });
        }
    }
    Ok(())
}

fn require(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
