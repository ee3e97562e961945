//! Paired series ordering
//!
//! Sorts two equal-length series by the ascending order of the first one
//! while keeping every `(primary[i], secondary[i])` pair together. Used by
//! contribution analysis so a position is weighted by the portfolio's
//! scenario ranking.

use crate::error::{HdVarError, Result};

/// Sort `primary` ascending and apply the same permutation to `secondary`.
///
/// The sort is stable: tied primary values keep their original relative
/// order. NaNs sort after every other value under IEEE total order.
pub fn co_sort(primary: &[f64], secondary: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if primary.len() != secondary.len() {
        return Err(HdVarError::LengthMismatch {
            primary: primary.len(),
            secondary: secondary.len(),
        });
    }

    let mut pairs: Vec<(f64, f64)> = primary
        .iter()
        .copied()
        .zip(secondary.iter().copied())
        .collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(pairs.into_iter().unzip())
}
