//! # savannah-core: Cart Logic for the Digital Savannah Marketplace
//!
//! This crate holds the cart's business rules as plain data and total
//! functions, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Digital Savannah Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web front end (React)                        │   │
//! │  │    Marketplace ──► Cart page ──► Billing                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    storefront app                               │   │
//! │  │    config, catalog, logging, toasts, billing redirect           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ savannah-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌─────────┐ ┌─────────┐ │   │
//! │  │   │  money  │ │  cart   │ │ checkout │ │ events  │ │ session │ │   │
//! │  │   │ Money   │ │ Ledger  │ │ shipping │ │ toasts  │ │ page    │ │   │
//! │  │   │ TaxRate │ │LineItem │ │ VAT      │ │ handoff │ │ handlers│ │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └─────────┘ └─────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Supplier, TaxRate, Currency)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - LineItem, Cart, CartLedger
//! - [`checkout`] - Shipping, VAT, grand total
//! - [`events`] - Cart events and the notification / checkout seams
//! - [`session`] - Cart page handlers over a ledger
//! - [`error`] - Domain error types
//! - [`validation`] - Catalog and input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use savannah_core::{CartLedger, CheckoutPolicy, Money, Product};
//!
//! let fertiliser = Product {
//!     id: "dap-50kg".to_string(),
//!     name: "DAP Fertiliser".to_string(),
//!     price: Money::from_units(2000),
//!     category: "Farm Inputs".to_string(),
//!     unit_of_measure: "50kg bag".to_string(),
//!     supplier: None,
//! };
//!
//! let mut ledger = CartLedger::new();
//! ledger.add_item(&fertiliser, 2);
//!
//! let totals = CheckoutPolicy::default().totals(ledger.cart());
//! assert_eq!(totals.grand_total.units(), 4940); // 4000 + 300 shipping + 640 VAT
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod checkout;
pub mod error;
pub mod events;
pub mod money;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLedger, CartSummary, LineItem};
pub use checkout::{compute_checkout_totals, CheckoutPolicy, CheckoutTotals};
pub use error::{CartError, CartResult, ValidationError};
pub use events::{
    CartEvent, CheckoutHandoff, CheckoutRequest, Notification, NotificationSink,
    NotificationVariant,
};
pub use money::Money;
pub use session::CartSession;
pub use types::*;
