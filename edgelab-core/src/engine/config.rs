//! Execution-side configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters of the execution simulator. Immutable for a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Starting cash.
    pub initial_capital: f64,
    /// Fraction of current equity risked per trade (e.g. 0.02 = 2%).
    pub risk_per_trade: f64,
    /// Trailing stop distance in ATRs. Zero disables stop management.
    pub atr_multiplier: f64,
    /// Transaction cost rate applied to both entry cost and exit revenue.
    pub tax_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            risk_per_trade: 0.02,
            atr_multiplier: 2.0,
            tax_rate: 0.001,
        }
    }
}

/// Errors from config validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("initial capital must be positive, got {0}")]
    NonPositiveCapital(f64),
    #[error("risk per trade must be in (0, 1), got {0}")]
    RiskOutOfRange(f64),
    #[error("ATR multiplier must be >= 0, got {0}")]
    NegativeAtrMultiplier(f64),
    #[error("tax rate must be >= 0, got {0}")]
    NegativeTaxRate(f64),
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_capital > 0.0) {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        if !(self.risk_per_trade > 0.0 && self.risk_per_trade < 1.0) {
            return Err(ConfigError::RiskOutOfRange(self.risk_per_trade));
        }
        if !(self.atr_multiplier >= 0.0) {
            return Err(ConfigError::NegativeAtrMultiplier(self.atr_multiplier));
        }
        if !(self.tax_rate >= 0.0) {
            return Err(ConfigError::NegativeTaxRate(self.tax_rate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_capital() {
        let cfg = EngineConfig {
            initial_capital: 0.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositiveCapital(_))
        ));
    }

    #[test]
    fn rejects_full_risk() {
        let cfg = EngineConfig {
            risk_per_trade: 1.0,
            ..EngineConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::RiskOutOfRange(_))));
    }

    #[test]
    fn rejects_nan_fields() {
        let cfg = EngineConfig {
            tax_rate: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_atr_multiplier_is_allowed() {
        let cfg = EngineConfig {
            atr_multiplier: 0.0,
            ..EngineConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
