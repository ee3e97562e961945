//! # hdvar-risk: Harrell-Davis Value-at-Risk
//!
//! This library estimates Value-at-Risk from historical PnL samples with the
//! Harrell-Davis smoothed quantile estimator, and decomposes portfolio VaR
//! into position-level contributions and incremental impacts.
//!
//! ## Core Components
//!
//! - **quantile**: HD weights and HD VaR (`hd_var`, `hd_var_presorted`)
//! - **annualize**: Heuristic horizon scaling and PV-normalized annual VaR
//! - **cosort**: Pairwise ordering of portfolio and position series
//! - **decomposition**: Contribution VaR and incremental VaR
//! - **HdVarEngine**: Configured engine loaded from YAML/JSON
//! - **market_data**: FX rate records and date alignment of series
//!
//! ## Example Usage
//!
//! ```rust
//! use hdvar_risk::{contribution, hd_var, HdVarEngine};
//!
//! let portfolio = vec![-100.0, -50.0, 0.0, 50.0, 100.0];
//! let position = vec![-20.0, -10.0, 0.0, 10.0, 20.0];
//!
//! // Lower-tail quantile of the portfolio PnL (negative = loss)
//! let var = hd_var(&portfolio, 0.95).unwrap();
//! assert!(var < 0.0);
//!
//! // Position moves one-for-five with the portfolio
//! let share = contribution(&portfolio, &position, 0.95).unwrap();
//! assert!((share - 0.2).abs() < 1e-12);
//!
//! let engine = HdVarEngine::from_yaml("confidence_level: 0.99").unwrap();
//! let result = engine.calculate(&portfolio, 1_000.0).unwrap();
//! assert!(result.annualized_var > 0.0);
//! ```

mod annualize;
mod config;
mod cosort;
mod decomposition;
mod engine;
mod error;
mod quantile;

pub mod market_data;

pub use annualize::{
    annualization_factor, annualize, annualized_dollar_var, validate_annualization_factor,
    DEFAULT_ANNUALIZATION_FACTOR, DEFAULT_HORIZON_DAYS, TRADING_DAYS_PER_YEAR,
};
pub use config::{AnnualizationRule, HdVarConfig};
pub use cosort::co_sort;
pub use decomposition::{
    contribution, incremental, incremental_breakdown, ContributionResult, IncrementalResult,
};
pub use engine::{HdVarEngine, HdVarResult};
pub use error::{HdVarError, Result};
pub use quantile::{
    hd_var, hd_var_presorted, hd_weights, validate_confidence_level, validate_series,
    DEFAULT_CONFIDENCE_LEVEL,
};
