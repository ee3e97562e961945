//! HD VaR engine
//!
//! Binds a validated [`HdVarConfig`] to the free functions of this crate so
//! callers do not repeat the confidence level and annualization factor on
//! every call. The engine holds no mutable state and can be shared across
//! threads.

use crate::annualize::normalize_and_annualize;
use crate::config::HdVarConfig;
use crate::decomposition::{self, ContributionResult, IncrementalResult};
use crate::error::{HdVarError, Result};
use crate::quantile::{hd_var, validate_confidence_level, validate_series};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// HD VaR calculation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HdVarResult {
    /// Signed HD VaR in the units of the PnL sample
    pub var_amount: f64,

    /// `var_amount / portfolio_value`; NaN when the portfolio value is zero
    pub var_pct: f64,

    /// Annualized magnitude of `var_pct`; NaN when the portfolio value is zero
    pub annualized_var: f64,

    /// Confidence level used
    pub confidence_level: f64,

    /// Number of PnL observations
    pub num_observations: usize,

    /// Timestamp of calculation
    pub timestamp: DateTime<Utc>,
}

/// Configured HD VaR engine
#[derive(Debug, Clone)]
pub struct HdVarEngine {
    config: HdVarConfig,
    factor: f64,
}

impl HdVarEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: HdVarConfig) -> Result<Self> {
        validate_confidence_level(config.confidence_level)?;
        let factor = config.annualization.factor()?;
        Ok(Self { config, factor })
    }

    /// Load the engine configuration from a YAML string
    ///
    /// # Example
    ///
    /// ```
    /// use hdvar_risk::HdVarEngine;
    ///
    /// let yaml = r#"
    /// confidence_level: 0.99
    /// annualization:
    ///   type: Factor
    ///   factor: 5.0
    /// "#;
    ///
    /// let engine = HdVarEngine::from_yaml(yaml).unwrap();
    /// assert_eq!(engine.factor(), 5.0);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::new(HdVarConfig::from_yaml(yaml)?)
    }

    /// Load the engine configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(HdVarConfig::from_json(json)?)
    }

    pub fn config(&self) -> &HdVarConfig {
        &self.config
    }

    pub fn confidence_level(&self) -> f64 {
        self.config.confidence_level
    }

    /// Resolved annualization factor
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Signed HD VaR of a PnL sample
    pub fn var(&self, pnl: &[f64]) -> Result<f64> {
        hd_var(pnl, self.config.confidence_level)
    }

    /// HD VaR with its PV-normalized and annualized forms
    ///
    /// Unlike [`annualized_dollar_var`](crate::annualized_dollar_var), the
    /// sample is always validated: `var_amount` is reported even when the
    /// portfolio value is zero, so an empty sample is an error here.
    pub fn calculate(&self, pnl: &[f64], portfolio_value: f64) -> Result<HdVarResult> {
        let var_amount = self.var(pnl)?;

        if portfolio_value == 0.0 {
            debug!("Portfolio value is zero, annualized VaR undefined");
        }
        let (var_pct, annualized_var) =
            normalize_and_annualize(var_amount, portfolio_value, self.factor);

        debug!(
            observations = pnl.len(),
            var_amount,
            annualized_var,
            "Computed HD VaR"
        );

        Ok(HdVarResult {
            var_amount,
            var_pct,
            annualized_var,
            confidence_level: self.config.confidence_level,
            num_observations: pnl.len(),
            timestamp: Utc::now(),
        })
    }

    /// Position's share of portfolio HD VaR
    pub fn contribution(&self, portfolio_pnl: &[f64], position_pnl: &[f64]) -> Result<f64> {
        decomposition::contribution(portfolio_pnl, position_pnl, self.config.confidence_level)
    }

    /// Contributions of many positions against one portfolio
    ///
    /// Positions are evaluated in parallel; the output keeps input order.
    pub fn contribution_report(
        &self,
        portfolio_pnl: &[f64],
        positions: &[(String, Vec<f64>)],
    ) -> Result<Vec<ContributionResult>> {
        validate_series(portfolio_pnl)?;

        if positions.is_empty() {
            return Err(HdVarError::InvalidParameter(
                "No positions provided".to_string(),
            ));
        }

        info!(
            positions = positions.len(),
            observations = portfolio_pnl.len(),
            "Computing contribution report"
        );

        positions
            .par_iter()
            .map(|(position_id, pnl)| -> Result<ContributionResult> {
                let contribution = self.contribution(portfolio_pnl, pnl)?;
                Ok(ContributionResult {
                    position_id: position_id.clone(),
                    contribution,
                })
            })
            .collect()
    }

    /// Change in annualized VaR from trading `weight` units of a position
    pub fn incremental(
        &self,
        portfolio_pnl: &[f64],
        portfolio_pv: f64,
        position_pnl: &[f64],
        position_pv: f64,
        weight: f64,
    ) -> Result<IncrementalResult> {
        decomposition::incremental_breakdown(
            portfolio_pnl,
            portfolio_pv,
            position_pnl,
            position_pv,
            weight,
            self.config.confidence_level,
            self.factor,
        )
    }
}
