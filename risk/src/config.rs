//! HD VaR configuration
//!
//! Configuration is typically loaded from YAML or JSON documents:
//!
//! ```yaml
//! confidence_level: 0.99
//! annualization:
//!   type: Horizon
//!   trading_days: 252
//!   horizon_days: 10
//! ```

use crate::annualize::{
    annualization_factor, validate_annualization_factor, DEFAULT_HORIZON_DAYS,
    TRADING_DAYS_PER_YEAR,
};
use crate::error::{HdVarError, Result};
use crate::quantile::{validate_confidence_level, DEFAULT_CONFIDENCE_LEVEL};
use serde::{Deserialize, Serialize};

/// How period VaR is projected to an annual figure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum AnnualizationRule {
    /// Use an explicit factor
    Factor {
        /// Annualization factor (positive)
        factor: f64,
    },

    /// Derive the factor as √(trading_days / horizon_days)
    Horizon {
        /// Trading days per year
        #[serde(default = "default_trading_days")]
        trading_days: f64,

        /// Length of the VaR horizon in trading days
        #[serde(default = "default_horizon_days")]
        horizon_days: f64,
    },
}

impl AnnualizationRule {
    /// Resolve the rule to a validated factor
    pub fn factor(&self) -> Result<f64> {
        let factor = match self {
            AnnualizationRule::Factor { factor } => *factor,
            AnnualizationRule::Horizon {
                trading_days,
                horizon_days,
            } => annualization_factor(*trading_days, *horizon_days)?,
        };
        validate_annualization_factor(factor)?;
        Ok(factor)
    }
}

impl Default for AnnualizationRule {
    fn default() -> Self {
        AnnualizationRule::Horizon {
            trading_days: TRADING_DAYS_PER_YEAR,
            horizon_days: DEFAULT_HORIZON_DAYS,
        }
    }
}

fn default_trading_days() -> f64 {
    TRADING_DAYS_PER_YEAR
}

fn default_horizon_days() -> f64 {
    DEFAULT_HORIZON_DAYS
}

fn default_confidence_level() -> f64 {
    DEFAULT_CONFIDENCE_LEVEL
}

/// HD VaR engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HdVarConfig {
    /// Confidence level in (0, 1)
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,

    /// Annualization rule
    #[serde(default)]
    pub annualization: AnnualizationRule,
}

impl Default for HdVarConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            annualization: AnnualizationRule::default(),
        }
    }
}

impl HdVarConfig {
    /// Parse and validate a YAML configuration
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: HdVarConfig = serde_yaml::from_str(yaml)
            .map_err(|e| HdVarError::Config(format!("Failed to parse YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: HdVarConfig = serde_json::from_str(json)
            .map_err(|e| HdVarError::Config(format!("Failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check confidence level and annualization rule
    pub fn validate(&self) -> Result<()> {
        validate_confidence_level(self.confidence_level)?;
        self.annualization.factor()?;
        Ok(())
    }
}
