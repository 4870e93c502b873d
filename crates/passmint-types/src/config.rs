//! Construction-time configuration of a registry.
//!
//! Everything here is fixed for the life of the registry.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Address, PassmintError, Result, constants};

/// Parameters a registry is created with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Human-readable collection label.
    pub name: String,
    /// Prefix of every metadata pointer (`base_uri + id + ".json"`).
    pub base_uri: String,
    /// Price of one pass.
    #[serde(default = "default_unit_price")]
    pub unit_price: Decimal,
    /// Supply cap.
    #[serde(default = "default_max_supply")]
    pub max_supply: u64,
    /// Withdrawal destination. `None` sends withdrawals to the current owner.
    #[serde(default)]
    pub payee: Option<Address>,
}

fn default_unit_price() -> Decimal {
    constants::DEFAULT_UNIT_PRICE
}

fn default_max_supply() -> u64 {
    constants::DEFAULT_MAX_SUPPLY
}

impl RegistryConfig {
    /// Config with the default price and supply cap.
    #[must_use]
    pub fn new(name: impl Into<String>, base_uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_uri: base_uri.into(),
            unit_price: constants::DEFAULT_UNIT_PRICE,
            max_supply: constants::DEFAULT_MAX_SUPPLY,
            payee: None,
        }
    }

    #[must_use]
    pub fn with_payee(mut self, payee: Address) -> Self {
        self.payee = Some(payee);
        self
    }

    #[must_use]
    pub fn with_unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    #[must_use]
    pub fn with_max_supply(mut self, max_supply: u64) -> Self {
        self.max_supply = max_supply;
        self
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations a registry cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.base_uri.trim().is_empty() {
            return Err(PassmintError::Configuration("base_uri is empty".into()));
        }
        if self.base_uri.len() > constants::MAX_BASE_URI_LEN {
            return Err(PassmintError::Configuration(format!(
                "base_uri is {} bytes, limit is {}",
                self.base_uri.len(),
                constants::MAX_BASE_URI_LEN
            )));
        }
        if self.unit_price.is_sign_negative() {
            return Err(PassmintError::Configuration(format!(
                "unit_price {} is negative",
                self.unit_price
            )));
        }
        if self.max_supply == 0 {
            return Err(PassmintError::Configuration(
                "max_supply must be > 0".into(),
            ));
        }
        if self.payee.is_some_and(|p| p.is_zero()) {
            return Err(PassmintError::Configuration(
                "payee must be a non-zero address".into(),
            ));
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(constants::DEFAULT_COLLECTION_NAME, "ipfs://passmint/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let cfg = RegistryConfig::new("Club Pass", "ipfs://Qm/");
        assert_eq!(cfg.unit_price, Decimal::new(1, 1));
        assert_eq!(cfg.max_supply, 1000);
        assert!(cfg.payee.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let payee = Address::from_low_u64(9);
        let cfg = RegistryConfig::new("Club Pass", "ipfs://Qm/")
            .with_payee(payee)
            .with_unit_price(Decimal::new(25, 2))
            .with_max_supply(3);
        assert_eq!(cfg.payee, Some(payee));
        assert_eq!(cfg.unit_price, Decimal::new(25, 2));
        assert_eq!(cfg.max_supply, 3);
    }

    #[test]
    fn rejects_empty_base_uri() {
        let err = RegistryConfig::new("x", "  ").validate().unwrap_err();
        assert!(matches!(err, PassmintError::Configuration(_)));
    }

    #[test]
    fn rejects_negative_price() {
        let err = RegistryConfig::default()
            .with_unit_price(Decimal::new(-1, 1))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn rejects_zero_supply_and_zero_payee() {
        assert!(RegistryConfig::default().with_max_supply(0).validate().is_err());
        assert!(
            RegistryConfig::default()
                .with_payee(Address::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn free_mint_is_allowed() {
        let cfg = RegistryConfig::default().with_unit_price(Decimal::ZERO);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let cfg = RegistryConfig::from_json_str(
            r#"{"name":"Club Pass","base_uri":"ipfs://QmSy/"}"#,
        )
        .unwrap();
        assert_eq!(cfg.max_supply, 1000);
        assert_eq!(cfg.unit_price, Decimal::new(1, 1));
    }

    #[test]
    fn from_json_validates() {
        let err = RegistryConfig::from_json_str(
            r#"{"name":"Club Pass","base_uri":"ipfs://QmSy/","max_supply":0}"#,
        )
        .unwrap_err();
        assert!(matches!(err, PassmintError::Configuration(_)));

        let err = RegistryConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, PassmintError::Serialization(_)));
    }

    #[test]
    fn serde_roundtrip() {
        let cfg = RegistryConfig::default().with_payee(Address::from_low_u64(3));
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RegistryConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
