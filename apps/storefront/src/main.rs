//! Savannah cart service entry point.
//!
//! Reads cart commands from stdin as JSON lines and answers on stdout.

use anyhow::Context;
use tokio::io::BufReader;
use tracing::info;

use savannah_storefront::catalog::Catalog;
use savannah_storefront::config::StorefrontConfig;
use savannah_storefront::{init_tracing, run_session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::load().context("Failed to load configuration")?;
    init_tracing(config.log_filter.as_deref());

    info!("Starting Savannah cart service");

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => {
            info!("No catalog configured, using sample products");
            Catalog::sample()
        }
    };
    info!(products = catalog.len(), currency = %config.currency_code, "Catalog ready");

    let stdin = BufReader::new(tokio::io::stdin());
    run_session(&config, &catalog, stdin, tokio::io::stdout()).await?;

    info!("Savannah cart service stopped");
    Ok(())
}
