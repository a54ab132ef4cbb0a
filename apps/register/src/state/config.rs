//! # Configuration State
//!
//! Register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`WPOS_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Serialize;
use wpos_core::validation::{parse_hundredths, validate_items_per_page};
use wpos_core::{Money, TaxRate, DEFAULT_ITEMS_PER_PAGE, VAT_RATE};

use crate::error::ConfigError;

const CATALOG_FILE: &str = "products.json";

/// Register configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the app bar
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// VAT charged on regular lines
    pub vat_rate: TaxRate,

    /// JSON catalog file
    pub catalog_path: PathBuf,

    /// Catalog cards per page
    pub items_per_page: usize,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "W POS Storefront"
    /// - Currency: THB (฿)
    /// - VAT: 7%
    /// - Catalog: `products.json` in the platform data directory
    /// - Page size: 6
    fn default() -> Self {
        ConfigState {
            store_name: "W POS Storefront".to_string(),
            currency_symbol: "฿".to_string(),
            vat_rate: VAT_RATE,
            catalog_path: default_catalog_path(),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `WPOS_STORE_NAME`: Override store name
    /// - `WPOS_VAT_RATE`: VAT in percent (e.g., "7" or "7.5")
    /// - `WPOS_CATALOG_PATH`: Catalog JSON file
    /// - `WPOS_ITEMS_PER_PAGE`: Catalog page size
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("WPOS_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(rate) = lookup("WPOS_VAT_RATE") {
            // Percent with two decimals is exactly basis points
            let bps = parse_hundredths("WPOS_VAT_RATE", &rate)
                .ok()
                .and_then(|bps| u32::try_from(bps).ok())
                .filter(|bps| *bps <= 10_000)
                .ok_or_else(|| invalid("WPOS_VAT_RATE", "expected a percentage from 0 to 100"))?;
            config.vat_rate = TaxRate::from_bps(bps);
        }

        if let Some(path) = lookup("WPOS_CATALOG_PATH") {
            config.catalog_path = PathBuf::from(path);
        }

        if let Some(per_page) = lookup("WPOS_ITEMS_PER_PAGE") {
            let per_page: usize = per_page
                .trim()
                .parse()
                .map_err(|_| invalid("WPOS_ITEMS_PER_PAGE", "expected a whole number"))?;
            validate_items_per_page(per_page)
                .map_err(|e| invalid("WPOS_ITEMS_PER_PAGE", &e.to_string()))?;
            config.items_per_page = per_page;
        }

        Ok(config)
    }

    /// Formats money with the configured symbol and thousands separators.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::Money;
    /// use wpos_register::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_satang(123_450)), "฿1,234.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Platform data directory, falling back to the working directory.
///
/// - **macOS**: `~/Library/Application Support/com.wpos.register/products.json`
/// - **Windows**: `%APPDATA%\wpos\register\data\products.json`
/// - **Linux**: `~/.local/share/register/products.json`
fn default_catalog_path() -> PathBuf {
    ProjectDirs::from("com", "wpos", "register")
        .map(|dirs| dirs.data_dir().join(CATALOG_FILE))
        .unwrap_or_else(|| PathBuf::from(CATALOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.vat_rate, VAT_RATE);
        assert_eq!(config.items_per_page, 6);
        assert!(config.catalog_path.ends_with("products.json"));
    }

    #[test]
    fn test_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("WPOS_STORE_NAME", "Siam Branch"),
            ("WPOS_VAT_RATE", "7.5"),
            ("WPOS_CATALOG_PATH", "/tmp/catalog.json"),
            ("WPOS_ITEMS_PER_PAGE", "4"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Siam Branch");
        assert_eq!(config.vat_rate.bps(), 750);
        assert_eq!(config.catalog_path, PathBuf::from("/tmp/catalog.json"));
        assert_eq!(config.items_per_page, 4);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("WPOS_VAT_RATE", "seven"),
            ("WPOS_VAT_RATE", "101"),
            ("WPOS_ITEMS_PER_PAGE", "0"),
            ("WPOS_ITEMS_PER_PAGE", "-3"),
        ] {
            let result = ConfigState::from_lookup(lookup(&[(key, value)]));
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { key: ref k, .. }) if k == key),
                "{key}={value}"
            );
        }
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_satang(1234)), "฿12.34");
        assert_eq!(config.format_currency(Money::zero()), "฿0.00");
        assert_eq!(config.format_currency(Money::from_satang(-1234)), "-฿12.34");
        assert_eq!(
            config.format_currency(Money::from_satang(123_456_789)),
            "฿1,234,567.89"
        );
    }
}
