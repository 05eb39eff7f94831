//! # Savannah Storefront
//!
//! The storefront's cart service: a JSON-lines loop around one
//! [`CartSession`](savannah_core::CartSession).
//!
//! ## Module Organization
//! ```text
//! savannah_storefront/
//! ├── lib.rs          ◄─── You are here (tracing setup & session loop)
//! ├── catalog.rs      ◄─── Product lookup
//! ├── commands.rs     ◄─── Command parsing and dispatch
//! ├── config.rs       ◄─── Layered configuration
//! ├── notify.rs       ◄─── Toasts and billing redirect
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Session Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin ──► line ──► CartCommand ──► dispatch ──► Reply ──► stdout       │
//! │                │                                                        │
//! │                └── bad UTF-8 / JSON ──► INVALID_COMMAND reply           │
//! │                                                                         │
//! │  EOF ──► await pending billing redirects ──► exit                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod notify;

use savannah_core::CartSession;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use commands::{dispatch, CartCommand, Reply, StorefrontSession};
use config::StorefrontConfig;
use error::ApiError;
use notify::{BillingRedirect, ToastQueue};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,savannah_storefront=debug";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `log_filter` in `savannah.toml` - Used when `RUST_LOG` is unset
/// - Default: INFO, DEBUG for the storefront
///
/// Logs go to stderr; stdout carries the reply stream.
pub fn init_tracing(log_filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Builds a session from configuration.
pub fn new_session(config: &StorefrontConfig) -> StorefrontSession {
    CartSession::new(
        config.checkout_policy(),
        ToastQueue::new(config.currency()),
        BillingRedirect::new(config.billing_route.clone(), config.redirect_delay()),
    )
}

/// Serves commands from `input` until EOF, writing one reply per line.
///
/// Blank lines are skipped. Redirects scheduled by checkout are awaited
/// before returning.
pub async fn run_session<R, W>(
    config: &StorefrontConfig,
    catalog: &Catalog,
    mut input: R,
    mut output: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = new_session(config);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        if buf.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let reply = match parse_command(&buf) {
            Ok(command) => dispatch(&mut session, catalog, command),
            Err(e) => {
                warn!(error = %e, "unreadable command");
                Reply::failure(e, Vec::new())
            }
        };

        let mut encoded = serde_json::to_vec(&reply)?;
        encoded.push(b'\n');
        output.write_all(&encoded).await?;
        output.flush().await?;
    }

    debug!("input closed");
    let routes = session.handoff_mut().settle().await;
    if !routes.is_empty() {
        info!(redirects = routes.len(), "billing redirects completed");
    }

    Ok(())
}

/// Decodes one input line into a command.
fn parse_command(line: &[u8]) -> Result<CartCommand, ApiError> {
    let text = std::str::from_utf8(line)
        .map_err(|e| ApiError::invalid_command(format!("Invalid command: {}", e)))?;
    serde_json::from_str(text.trim())
        .map_err(|e| ApiError::invalid_command(format!("Invalid command: {}", e)))
}
