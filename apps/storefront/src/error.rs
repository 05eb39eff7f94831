//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  {"op":"checkout"}                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  execute(command) -> Result<CartResponse, ApiError>              │  │
//! │  │         │                                                        │  │
//! │  │  Unknown product? ── ApiError::not_found ────────────┐           │  │
//! │  │  Empty checkout?  ── CartError::EmptyCart ────► ApiError ───────►│  │
//! │  │  Bad JSON line?   ── ApiError::invalid_command ───────┘          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"ok":false,"error":{"code":"EMPTY_CART","message":"Cart is empty"}}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use savannah_core::{CartError, ValidationError};
use serde::Serialize;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: maize-90kg"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Catalog product or cart line not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Checkout requested with nothing in the cart
    EmptyCart,

    /// The command line could not be understood
    InvalidCommand,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an invalid command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidCommand, message)
    }
}

/// Converts cart errors to API errors.
impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::EmptyCart => ApiError::new(
                ErrorCode::EmptyCart,
                "Cart is empty. Add some items to your cart before checking out",
            ),
            CartError::ItemNotFound(id) => ApiError::not_found("Cart item", &id),
            CartError::InvalidQuantity { quantity } => {
                ApiError::validation(format!("Quantity must be at least 1, got {}", quantity))
            }
            CartError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
