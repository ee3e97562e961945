//! Horizon scaling of VaR percentages
//!
//! The annualization rule is a fixed heuristic, not a distributional
//! transform. For `m = |period_pct|`:
//!
//! - `m > 1`: annual = m · factor
//! - otherwise: annual = 1 − (1 − m)^factor
//!
//! With the default factor √(252 / 10) a 10-day VaR is projected to a year.

use crate::error::{HdVarError, Result};
use crate::quantile::hd_var;

/// Trading days in a year
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Default VaR horizon in trading days
pub const DEFAULT_HORIZON_DAYS: f64 = 10.0;

/// √(252 / 10) = √25.2
pub const DEFAULT_ANNUALIZATION_FACTOR: f64 = 5.019_960_159_204_453;

/// Annualization factor √(trading_days / horizon_days)
pub fn annualization_factor(trading_days: f64, horizon_days: f64) -> Result<f64> {
    if !(trading_days > 0.0 && trading_days.is_finite()) {
        return Err(HdVarError::InvalidParameter(format!(
            "trading days must be positive, got {trading_days}"
        )));
    }
    if !(horizon_days > 0.0 && horizon_days.is_finite()) {
        return Err(HdVarError::InvalidParameter(format!(
            "horizon days must be positive, got {horizon_days}"
        )));
    }

    Ok((trading_days / horizon_days).sqrt())
}

/// Check that an annualization factor is positive and finite
pub fn validate_annualization_factor(factor: f64) -> Result<()> {
    if !(factor > 0.0 && factor.is_finite()) {
        return Err(HdVarError::InvalidAnnualizationFactor(factor));
    }
    Ok(())
}

/// Scale a period VaR percentage to an annual magnitude
///
/// The sign of `period_pct` is discarded; the result is never negative.
pub fn annualize(period_pct: f64, factor: f64) -> f64 {
    let magnitude = period_pct.abs();
    if magnitude > 1.0 {
        magnitude * factor
    } else {
        1.0 - (1.0 - magnitude).powf(factor)
    }
}

/// Normalize a dollar VaR by its present value and annualize it
///
/// Returns `(var_pct, annualized)`; both are NaN when `portfolio_value` is
/// zero.
pub(crate) fn normalize_and_annualize(var_amount: f64, portfolio_value: f64, factor: f64) -> (f64, f64) {
    if portfolio_value == 0.0 {
        return (f64::NAN, f64::NAN);
    }

    let var_pct = var_amount / portfolio_value;
    (var_pct, annualize(var_pct, factor))
}

/// Annualized VaR of a dollar PnL sample normalized by its present value
///
/// A zero `portfolio_value` yields `NaN` rather than an error: the ratio is
/// undefined, not malformed. The sample is not inspected in that case, so
/// even an empty sample returns `NaN`. Otherwise sample and confidence level
/// are validated.
pub fn annualized_dollar_var(
    pnl: &[f64],
    portfolio_value: f64,
    confidence_level: f64,
    factor: f64,
) -> Result<f64> {
    if portfolio_value == 0.0 {
        return Ok(f64::NAN);
    }

    let var_amount = hd_var(pnl, confidence_level)?;
    Ok(normalize_and_annualize(var_amount, portfolio_value, factor).1)
}
