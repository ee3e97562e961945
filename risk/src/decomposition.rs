//! Portfolio VaR decomposition
//!
//! Provides position-level views of portfolio tail risk:
//! - Contribution VaR: share of the portfolio's HD VaR attributable to a
//!   position, measured under the portfolio's own scenario ranking
//! - Incremental VaR: change in annualized VaR when a position is added,
//!   resized or liquidated

use crate::annualize::annualize;
use crate::cosort::co_sort;
use crate::error::{HdVarError, Result};
use crate::quantile::{hd_var, hd_var_presorted, validate_series};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Contribution of a single position to portfolio VaR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionResult {
    /// Position identifier
    pub position_id: String,

    /// Position VaR / portfolio VaR under the portfolio ordering.
    /// Not bounded to [0, 1]: hedges come out negative.
    pub contribution: f64,
}

/// Breakdown of an incremental VaR calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementalResult {
    /// Portfolio VaR / portfolio PV before the trade
    pub before_pct: f64,

    /// Combined VaR / combined PV after the trade
    pub after_pct: f64,

    /// Annualized `before_pct`
    pub before_annualized: f64,

    /// Annualized `after_pct`
    pub after_annualized: f64,

    /// `after_annualized - before_annualized`
    pub incremental_var: f64,
}

/// Fraction of portfolio HD VaR attributable to a position
///
/// Both series are ordered by portfolio PnL before weighting, so the
/// position is evaluated in the portfolio's worst scenarios rather than its
/// own.
pub fn contribution(portfolio_pnl: &[f64], position_pnl: &[f64], confidence_level: f64) -> Result<f64> {
    if portfolio_pnl.len() != position_pnl.len() {
        return Err(HdVarError::TotalPositionMismatch {
            total: portfolio_pnl.len(),
            position: position_pnl.len(),
        });
    }

    let (sorted_portfolio, sorted_position) = co_sort(portfolio_pnl, position_pnl)?;

    let position_var = hd_var_presorted(&sorted_position, confidence_level)?;
    let portfolio_var = hd_var_presorted(&sorted_portfolio, confidence_level)?;

    if portfolio_var == 0.0 {
        warn!(
            observations = portfolio_pnl.len(),
            "Portfolio HD VaR is zero, contribution is not finite"
        );
    }

    Ok(position_var / portfolio_var)
}

/// Change in annualized VaR from trading `weight` units of a position
///
/// `weight = 1.0` adds the position, `weight = -1.0` liquidates it; other
/// values scale both its PnL and its PV.
#[allow(clippy::too_many_arguments)]
pub fn incremental(
    portfolio_pnl: &[f64],
    portfolio_pv: f64,
    position_pnl: &[f64],
    position_pv: f64,
    weight: f64,
    confidence_level: f64,
    factor: f64,
) -> Result<f64> {
    incremental_breakdown(
        portfolio_pnl,
        portfolio_pv,
        position_pnl,
        position_pv,
        weight,
        confidence_level,
        factor,
    )
    .map(|result| result.incremental_var)
}

/// Incremental VaR with its before/after components
#[allow(clippy::too_many_arguments)]
pub fn incremental_breakdown(
    portfolio_pnl: &[f64],
    portfolio_pv: f64,
    position_pnl: &[f64],
    position_pv: f64,
    weight: f64,
    confidence_level: f64,
    factor: f64,
) -> Result<IncrementalResult> {
    if portfolio_pnl.len() != position_pnl.len() {
        return Err(HdVarError::PortfolioPositionMismatch {
            portfolio: portfolio_pnl.len(),
            position: position_pnl.len(),
        });
    }

    if portfolio_pv == 0.0 || position_pv == 0.0 {
        return Err(HdVarError::ZeroPresentValue {
            portfolio_pv,
            position_pv,
        });
    }

    if !portfolio_pv.is_finite() || !position_pv.is_finite() {
        return Err(HdVarError::InvalidParameter(format!(
            "present values must be finite, got portfolio {portfolio_pv} and position {position_pv}"
        )));
    }

    if !weight.is_finite() {
        return Err(HdVarError::InvalidParameter(format!(
            "position weight must be finite, got {weight}"
        )));
    }

    validate_series(position_pnl)?;

    let combined_pv = portfolio_pv + weight * position_pv;
    if combined_pv == 0.0 {
        return Err(HdVarError::ZeroCombinedValue);
    }

    let combined_pnl: Vec<f64> = portfolio_pnl
        .iter()
        .zip(position_pnl.iter())
        .map(|(pfl, pos)| pfl + weight * pos)
        .collect();

    let before_pct = hd_var(portfolio_pnl, confidence_level)? / portfolio_pv;
    let after_pct = hd_var(&combined_pnl, confidence_level)? / combined_pv;

    let before_annualized = annualize(before_pct, factor);
    let after_annualized = annualize(after_pct, factor);

    debug!(
        weight,
        before_pct,
        after_pct,
        combined_pv,
        "Computed incremental HD VaR"
    );

    Ok(IncrementalResult {
        before_pct,
        after_pct,
        before_annualized,
        after_annualized,
        incremental_var: after_annualized - before_annualized,
    })
}
