//! # Cart Commands
//!
//! One JSON object per line in, one reply per line out.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ /billing │       │
//! │  │  Cart    │     │          │     │  toast   │     │ redirect │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                                                │
//! │       │           add / update                                          │
//! │       │           increment / decrement                                 │
//! │       │           remove                                                │
//! │       │                │                                                │
//! │       └──── clear ─────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```text
//! → {"op":"add","productId":"maize-90kg","quantity":2}
//! ← {"ok":true,"cart":{...},"notifications":[{"title":"Added to cart",...}]}
//!
//! → {"op":"checkout"}
//! ← {"ok":false,"error":{"code":"EMPTY_CART",...},"notifications":[...]}
//! ```

use savannah_core::{
    Cart, CartSession, CartSummary, CheckoutRequest, CheckoutTotals, Notification,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::notify::{BillingRedirect, ToastQueue};

/// The session type the storefront drives.
pub type StorefrontSession = CartSession<ToastQueue, BillingRedirect>;

/// A single cart operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CartCommand {
    Get,
    Add {
        product_id: String,
        /// Defaults to 1
        #[serde(default)]
        quantity: Option<i64>,
    },
    Update {
        item_id: String,
        quantity: i64,
    },
    /// Raw text typed into the quantity field
    SetQuantityInput {
        item_id: String,
        value: String,
    },
    Increment {
        item_id: String,
    },
    Decrement {
        item_id: String,
    },
    Remove {
        item_id: String,
    },
    Clear,
    Checkout,
}

impl CartCommand {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::Get => "get",
            CartCommand::Add { .. } => "add",
            CartCommand::Update { .. } => "update",
            CartCommand::SetQuantityInput { .. } => "setQuantityInput",
            CartCommand::Increment { .. } => "increment",
            CartCommand::Decrement { .. } => "decrement",
            CartCommand::Remove { .. } => "remove",
            CartCommand::Clear => "clear",
            CartCommand::Checkout => "checkout",
        }
    }
}

/// Cart state after a command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart: Cart,
    pub summary: CartSummary,
    pub totals: CheckoutTotals,
    /// Present only on a successful checkout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<CheckoutRequest>,
}

impl CartResponse {
    fn from_session(session: &StorefrontSession) -> Self {
        CartResponse {
            cart: session.cart().clone(),
            summary: session.cart().summary(),
            totals: session.totals(),
            checkout: None,
        }
    }
}

/// One response line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub ok: bool,

    #[serde(flatten)]
    pub cart: Option<CartResponse>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// Toasts raised while handling the command
    pub notifications: Vec<Notification>,
}

impl Reply {
    pub fn success(cart: CartResponse, notifications: Vec<Notification>) -> Self {
        Reply {
            ok: true,
            cart: Some(cart),
            error: None,
            notifications,
        }
    }

    pub fn failure(error: ApiError, notifications: Vec<Notification>) -> Self {
        Reply {
            ok: false,
            cart: None,
            error: Some(error),
            notifications,
        }
    }
}

/// Runs one command against the session.
///
/// ## Errors
/// - `NOT_FOUND` when `add` names a product outside the catalog
/// - `EMPTY_CART` when `checkout` is requested with nothing in the cart
///
/// Other operations on unknown cart lines are silent no-ops.
pub fn execute(
    session: &mut StorefrontSession,
    catalog: &Catalog,
    command: CartCommand,
) -> Result<CartResponse, ApiError> {
    debug!(op = command.name(), "cart command");

    let mut checkout = None;
    match command {
        CartCommand::Get => {}
        CartCommand::Add {
            product_id,
            quantity,
        } => {
            let product = catalog
                .get(&product_id)
                .ok_or_else(|| ApiError::not_found("Product", &product_id))?;
            session.add_item(product, quantity.unwrap_or(1));
        }
        CartCommand::Update { item_id, quantity } => {
            session.change_quantity(&item_id, quantity);
        }
        CartCommand::SetQuantityInput { item_id, value } => {
            session.set_quantity_from_input(&item_id, &value);
        }
        CartCommand::Increment { item_id } => {
            session.increment(&item_id);
        }
        CartCommand::Decrement { item_id } => {
            session.decrement(&item_id);
        }
        CartCommand::Remove { item_id } => {
            session.remove_item(&item_id);
        }
        CartCommand::Clear => {
            session.clear_cart();
        }
        CartCommand::Checkout => {
            checkout = Some(session.checkout()?);
        }
    }

    let mut response = CartResponse::from_session(session);
    response.checkout = checkout;
    Ok(response)
}

/// Runs a command and packages the outcome with any toasts it raised.
pub fn dispatch(
    session: &mut StorefrontSession,
    catalog: &Catalog,
    command: CartCommand,
) -> Reply {
    let result = execute(session, catalog, command);
    let notifications = session.notifier_mut().drain();
    match result {
        Ok(cart) => Reply::success(cart, notifications),
        Err(e) => Reply::failure(e, notifications),
    }
}
