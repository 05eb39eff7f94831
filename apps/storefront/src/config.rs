//! # Storefront Configuration
//!
//! Stores configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SAVANNAH_*`, e.g. `SAVANNAH_SHIPPING_FEE=250`)
//! 2. Config file (`savannah.toml`, or the path in `SAVANNAH_CONFIG`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use savannah_core::checkout::{
    DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_SHIPPING_FEE, DEFAULT_VAT_RATE,
};
use savannah_core::validation::{validate_price, validate_tax_rate_bps};
use savannah_core::{
    CheckoutPolicy, Currency, Money, TaxRate, ValidationError, MAX_CURRENCY_DECIMALS,
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "SAVANNAH";

/// Config file used when `SAVANNAH_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "savannah.toml";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places in the smallest unit
    pub currency_decimals: u8,

    /// Subtotals above this ship free
    pub free_shipping_threshold: i64,

    /// Flat shipping fee below the threshold
    pub shipping_fee: i64,

    /// VAT in basis points, e.g. 1600 = 16%
    pub vat_rate_bps: u32,

    /// Pause between "Proceeding to checkout!" and the billing redirect
    pub checkout_redirect_delay_ms: u64,

    /// Where checkout hands the user over to
    pub billing_route: String,

    /// Product catalog JSON. The built-in sample catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Tracing filter used when `RUST_LOG` is not set
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for StorefrontConfig {
    /// ## Default Values
    /// - Currency: KES, whole shillings
    /// - Free shipping above KES 5,000, otherwise KES 300
    /// - VAT: 16%
    /// - Billing redirect after 1.5 s to `/billing`
    fn default() -> Self {
        StorefrontConfig {
            currency_code: "KES".to_string(),
            currency_symbol: "KES".to_string(),
            currency_decimals: 0,
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD.units(),
            shipping_fee: DEFAULT_SHIPPING_FEE.units(),
            vat_rate_bps: DEFAULT_VAT_RATE.bps(),
            checkout_redirect_delay_ms: 1500,
            billing_route: "/billing".to_string(),
            catalog_path: None,
            log_filter: None,
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from the default file location and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(format!("{}_CONFIG", ENV_PREFIX))
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path, ENV_PREFIX)
    }

    /// Loads configuration from a file (optional) and prefixed environment.
    pub fn load_from(path: &Path, env_prefix: &str) -> Result<Self, ConfigError> {
        let defaults = StorefrontConfig::default();

        let settings = Config::builder()
            .set_default("currency_code", defaults.currency_code)?
            .set_default("currency_symbol", defaults.currency_symbol)?
            .set_default("currency_decimals", i64::from(defaults.currency_decimals))?
            .set_default("free_shipping_threshold", defaults.free_shipping_threshold)?
            .set_default("shipping_fee", defaults.shipping_fee)?
            .set_default("vat_rate_bps", i64::from(defaults.vat_rate_bps))?
            .set_default(
                "checkout_redirect_delay_ms",
                i64::try_from(defaults.checkout_redirect_delay_ms).unwrap_or(i64::MAX),
            )?
            .set_default("billing_route", defaults.billing_route)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?;

        let config: StorefrontConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that money and rate settings are usable.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_price(self.free_shipping_threshold)?;
        validate_price(self.shipping_fee)?;
        validate_tax_rate_bps(self.vat_rate_bps)?;

        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ValidationError::OutOfRange {
                field: "currency_decimals".to_string(),
                min: 0,
                max: i64::from(MAX_CURRENCY_DECIMALS),
            });
        }

        if self.billing_route.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "billing_route".to_string(),
            });
        }

        Ok(())
    }

    pub fn currency(&self) -> Currency {
        Currency::new(
            self.currency_code.clone(),
            self.currency_symbol.clone(),
            self.currency_decimals,
        )
    }

    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy::new(
            Money::from_units(self.free_shipping_threshold),
            Money::from_units(self.shipping_fee),
            TaxRate::from_bps(self.vat_rate_bps),
        )
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_redirect_delay_ms)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "savannah-{}-{}.toml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_defaults_when_no_file() {
        let missing = std::env::temp_dir().join("savannah-does-not-exist.toml");
        let config = StorefrontConfig::load_from(&missing, "SAVANNAH_TEST_DEFAULTS").unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.checkout_policy(), CheckoutPolicy::default());
        assert_eq!(config.redirect_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let path = temp_config(
            "file",
            "shipping_fee = 250\nvat_rate_bps = 800\ncatalog_path = \"catalog.json\"\n",
        );
        let config = StorefrontConfig::load_from(&path, "SAVANNAH_TEST_FILE").unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.shipping_fee, 250);
        assert_eq!(config.vat_rate_bps, 800);
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.json")));
        assert_eq!(config.free_shipping_threshold, 5000);
    }

    #[test]
    fn test_env_overrides_file() {
        let path = temp_config("env", "shipping_fee = 250\n");
        std::env::set_var("SAVANNAH_TEST_ENV_SHIPPING_FEE", "100");
        let config = StorefrontConfig::load_from(&path, "SAVANNAH_TEST_ENV").unwrap();
        std::env::remove_var("SAVANNAH_TEST_ENV_SHIPPING_FEE");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.shipping_fee, 100);
    }

    #[test]
    fn test_rejects_bad_tax_rate() {
        let path = temp_config("bad-rate", "vat_rate_bps = 20000\n");
        let result = StorefrontConfig::load_from(&path, "SAVANNAH_TEST_BAD_RATE");
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_too_many_decimals() {
        let config = StorefrontConfig {
            currency_decimals: MAX_CURRENCY_DECIMALS + 1,
            ..StorefrontConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::OutOfRange { max: 6, .. })
        ));
    }

    #[test]
    fn test_currency() {
        let currency = StorefrontConfig::default().currency();
        assert_eq!(currency, Currency::kes());
    }
}
