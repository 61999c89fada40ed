//! Cart configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cart::DEFAULT_STORAGE_KEY;
use crate::error::CartError;
use crate::money::Currency;

/// Default ceiling for a single line's quantity: the largest storable one.
pub const DEFAULT_MAX_QUANTITY_PER_ITEM: u32 = u32::MAX;

/// Settings for a [`CartEngine`](crate::cart::CartEngine).
///
/// ```toml
/// storage_key = "cart"
/// currency = "EUR"
/// max_quantity_per_item = 99
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the cart is persisted under.
    pub storage_key: String,
    /// Currency totals are reported in.
    pub currency: Currency,
    /// Quantities saturate at this value.
    pub max_quantity_per_item: u32,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::default(),
            max_quantity_per_item: DEFAULT_MAX_QUANTITY_PER_ITEM,
        }
    }
}

impl CartConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, CartError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the engine cannot work with.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.storage_key.trim().is_empty() {
            return Err(CartError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.max_quantity_per_item == 0 {
            return Err(CartError::InvalidConfig(
                "max_quantity_per_item must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the per-line quantity ceiling.
    pub fn with_max_quantity(mut self, max: u32) -> Self {
        self.max_quantity_per_item = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.max_quantity_per_item, u32::MAX);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = CartConfig::from_toml_str(r#"currency = "GBP""#).unwrap();
        assert_eq!(config.currency, Currency::GBP);
        assert_eq!(config.storage_key, "cart");
    }

    #[test]
    fn test_full_toml() {
        let config = CartConfig::from_toml_str(
            r#"
            storage_key = "shop-cart"
            currency = "JPY"
            max_quantity_per_item = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "shop-cart");
        assert_eq!(config.currency, Currency::JPY);
        assert_eq!(config.max_quantity_per_item, 10);
    }

    #[test]
    fn test_rejects_zero_max_quantity() {
        let err = CartConfig::from_toml_str("max_quantity_per_item = 0").unwrap_err();
        assert!(matches!(err, CartError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_empty_key() {
        let err = CartConfig::from_toml_str(r#"storage_key = " ""#).unwrap_err();
        assert!(matches!(err, CartError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = CartConfig::from_toml_str("currency = ").unwrap_err();
        assert!(matches!(err, CartError::ConfigParse(_)));
    }

    #[test]
    fn test_load_json_and_toml_files() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("cart.toml");
        std::fs::write(&toml_path, "max_quantity_per_item = 5\n").unwrap();
        assert_eq!(CartConfig::load(&toml_path).unwrap().max_quantity_per_item, 5);

        let json_path = dir.path().join("cart.json");
        std::fs::write(&json_path, r#"{"currency":"CAD"}"#).unwrap();
        assert_eq!(CartConfig::load(&json_path).unwrap().currency, Currency::CAD);
    }
}
