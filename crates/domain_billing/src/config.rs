//! Billing configuration

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::BillingError;

/// Billing configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Prefix of generated invoice numbers
    pub invoice_prefix: String,
    /// Days between sending an invoice and its due date
    pub payment_terms_days: u32,
    /// Labor rate used when a time entry has no negotiated rate
    pub default_hourly_rate: Decimal,
    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            invoice_prefix: "INV".to_string(),
            payment_terms_days: 30,
            default_hourly_rate: dec!(95.00),
            log_level: "info".to_string(),
        }
    }
}

impl BillingConfig {
    /// Loads configuration from `BILLING_*` environment variables over the defaults
    pub fn from_env() -> Result<Self, BillingError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("BILLING").try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| BillingError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BillingError> {
        if self.invoice_prefix.trim().is_empty() {
            return Err(BillingError::Configuration("invoice_prefix must not be empty".to_string()));
        }
        if self.payment_terms_days > 365 {
            return Err(BillingError::Configuration(format!(
                "payment_terms_days must be at most 365, got {}",
                self.payment_terms_days
            )));
        }
        if self.default_hourly_rate <= Decimal::ZERO {
            return Err(BillingError::Configuration(format!(
                "default_hourly_rate must be positive, got {}",
                self.default_hourly_rate
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BillingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_long_terms() {
        let config = BillingConfig {
            payment_terms_days: 400,
            ..BillingConfig::default()
        };
        assert!(matches!(config.validate(), Err(BillingError::Configuration(_))));
    }

    #[test]
    fn test_deserializes_partial_input() {
        let config: BillingConfig = serde_json::from_str(r#"{"invoice_prefix": "AV"}"#).unwrap();
        assert_eq!(config.invoice_prefix, "AV");
        assert_eq!(config.payment_terms_days, 30);
    }
}
