//! Harrell-Davis quantile estimation
//!
//! Instead of picking the single order statistic at rank ⌈N·(1−ci)⌉, the
//! Harrell-Davis estimator averages every order statistic, weighting each
//! one by the beta-distributed probability mass that falls into its rank
//! interval:
//!
//! - α = (N+1)·(1−ci), β = (N+1)·ci
//! - F(x) = I_x(α, β), the regularized incomplete beta function
//! - w_i = F((i+1)/N) − F(i/N) for i = 0..N−1
//! - VaR = Σ w_i · x_(i)
//!
//! The result keeps the sign of the PnL: a loss-side quantile is negative.

use crate::error::{HdVarError, Result};
use nalgebra::DVector;
use statrs::function::beta::checked_beta_reg;

/// Default confidence level
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Check that a confidence level lies strictly inside (0, 1)
pub fn validate_confidence_level(confidence_level: f64) -> Result<()> {
    // Written as a negation so NaN is rejected too
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(HdVarError::InvalidConfidenceLevel(confidence_level));
    }
    Ok(())
}

/// Check that a PnL series is non-empty and fully finite
pub fn validate_series(pnl: &[f64]) -> Result<()> {
    if pnl.is_empty() {
        return Err(HdVarError::EmptySeries);
    }

    if let Some((index, &value)) = pnl.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(HdVarError::NonFiniteObservation { index, value });
    }

    Ok(())
}

/// Compute the Harrell-Davis weights for a sample of `n` observations
///
/// Weight `i` is the probability mass the Beta(α, β) distribution assigns to
/// `[i/n, (i+1)/n]`. Weights are nonnegative and sum to one up to rounding.
pub fn hd_weights(n: usize, confidence_level: f64) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(HdVarError::EmptySeries);
    }
    validate_confidence_level(confidence_level)?;

    let shape_beta = (n + 1) as f64 * confidence_level;
    let shape_alpha = (n + 1) as f64 * (1.0 - confidence_level);

    let mut cdf = Vec::with_capacity(n + 1);
    cdf.push(0.0);
    for i in 1..n {
        let x = i as f64 / n as f64;
        let value = checked_beta_reg(shape_alpha, shape_beta, x).map_err(|e| {
            HdVarError::NumericalInstability(format!(
                "I_{x}({shape_alpha}, {shape_beta}): {e}"
            ))
        })?;
        if !value.is_finite() {
            return Err(HdVarError::NumericalInstability(format!(
                "I_{x}({shape_alpha}, {shape_beta}) evaluated to {value}"
            )));
        }
        cdf.push(value);
    }
    cdf.push(1.0);

    // Clamp rounding noise where the CDF is flat
    let weights = cdf
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).max(0.0))
        .collect();

    Ok(weights)
}

/// Harrell-Davis VaR of an unordered PnL sample
///
/// The sample is sorted ascending internally; the input is left untouched.
///
/// # Example
///
/// ```
/// use hdvar_risk::hd_var;
///
/// let pnl = vec![-100.0, -50.0, 0.0, 50.0, 100.0];
/// let var = hd_var(&pnl, 0.95).unwrap();
/// assert!(var < -90.0 && var > -100.0);
/// ```
pub fn hd_var(pnl: &[f64], confidence_level: f64) -> Result<f64> {
    validate_series(pnl)?;

    let mut sorted = pnl.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    hd_var_presorted(&sorted, confidence_level)
}

/// Harrell-Davis VaR of a sample whose ordering is supplied by the caller
///
/// Weights are applied by position, so the caller decides which ordering
/// the order statistics follow. Contribution analysis relies on this to rank
/// a position's PnL by the portfolio's scenario order.
pub fn hd_var_presorted(pnl: &[f64], confidence_level: f64) -> Result<f64> {
    validate_series(pnl)?;

    let weights = DVector::from_vec(hd_weights(pnl.len(), confidence_level)?);
    let observations = DVector::from_column_slice(pnl);

    Ok(weights.dot(&observations))
}
