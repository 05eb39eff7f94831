//! # Error Types
//!
//! Domain-specific error types for savannah-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  savannah-core errors (this file)                                      │
//! │  ├── CartError        - Cart no-op reasons and checkout rejection      │
//! │  └── ValidationError  - Catalog / input validation failures            │
//! │                                                                         │
//! │  storefront errors (app)                                               │
//! │  └── ApiError         - What the client sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Most Cart Errors Never Escape
//! The ledger's everyday operations are total. `InvalidQuantity` and
//! `ItemNotFound` are only returned by the `try_*` variants so a caller can
//! log why nothing changed. `EmptyCart` is the one error a user sees, raised
//! when checkout is requested with nothing in the cart.

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart operation outcomes that leave the cart unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity update below the minimum of 1.
    ///
    /// ## When This Occurs
    /// - The minus button pressed at quantity 1
    /// - A quantity field cleared to 0 or typed as negative
    ///
    /// Removal is a separate explicit operation, never implied by zero.
    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// No line item with this id is in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotFound(String),

    /// Checkout was requested on a cart with no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used when catalog data or configuration enters the system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g., two catalog products with one id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
