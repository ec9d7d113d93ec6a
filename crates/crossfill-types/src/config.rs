//! Configuration for the settlement engine and escrow schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{constants, CrossfillError, Result};

/// Settlement engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Maximum relative deviation of a fill's implied rate from the
    /// order's declared rate (0.001 = 0.1%).
    pub rate_tolerance: Decimal,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            rate_tolerance: Decimal::new(constants::DEFAULT_RATE_TOLERANCE_PER_MILLE, 3),
        }
    }
}

impl SettlementConfig {
    /// Parse from JSON and validate. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| CrossfillError::Configuration(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Tolerance must lie in `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.rate_tolerance.is_sign_negative() || self.rate_tolerance >= Decimal::ONE {
            return Err(CrossfillError::Configuration(format!(
                "rate_tolerance must be in [0, 1), got {}",
                self.rate_tolerance
            )));
        }
        Ok(())
    }
}

/// Escrow-side configuration consumed by the timelock queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowConfig {
    /// Seconds after deployment when anyone may rescue escrowed funds.
    pub rescue_delay: u64,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            rescue_delay: constants::DEFAULT_RESCUE_DELAY_SECS,
        }
    }
}

impl EscrowConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| CrossfillError::Configuration(e.to_string()))?;
        if cfg.rescue_delay == 0 {
            return Err(CrossfillError::Configuration(
                "rescue_delay must be non-zero".into(),
            ));
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_defaults() {
        let cfg = SettlementConfig::default();
        assert_eq!(cfg.rate_tolerance, Decimal::new(1, 3));
        cfg.validate().unwrap();
    }

    #[test]
    fn settlement_from_json() {
        let cfg = SettlementConfig::from_json_str(r#"{"rate_tolerance":"0.005"}"#).unwrap();
        assert_eq!(cfg.rate_tolerance, Decimal::new(5, 3));

        let cfg = SettlementConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, SettlementConfig::default());
    }

    #[test]
    fn settlement_rejects_out_of_range() {
        let err = SettlementConfig::from_json_str(r#"{"rate_tolerance":"1.5"}"#).unwrap_err();
        assert!(matches!(err, CrossfillError::Configuration(_)));
        assert!(SettlementConfig::from_json_str(r#"{"rate_tolerance":"-0.1"}"#).is_err());
        assert!(SettlementConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn escrow_defaults_and_json() {
        assert_eq!(EscrowConfig::default().rescue_delay, 604_800);
        let cfg = EscrowConfig::from_json_str(r#"{"rescue_delay":3600}"#).unwrap();
        assert_eq!(cfg.rescue_delay, 3600);
        assert!(EscrowConfig::from_json_str(r#"{"rescue_delay":0}"#).is_err());
    }
}
