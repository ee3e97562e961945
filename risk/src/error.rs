//! Error types for HD VaR calculations

use thiserror::Error;

/// Errors that can occur in HD VaR calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HdVarError {
    #[error("PnL series is empty")]
    EmptySeries,

    #[error("Invalid confidence level: {0} (must be between 0 and 1)")]
    InvalidConfidenceLevel(f64),

    #[error("Non-finite PnL observation {value} at index {index}")]
    NonFiniteObservation { index: usize, value: f64 },

    #[error("Paired series have unequal data points ({primary} vs {secondary})")]
    LengthMismatch { primary: usize, secondary: usize },

    #[error("Total and Position PnL have unequal data points ({total} vs {position})")]
    TotalPositionMismatch { total: usize, position: usize },

    #[error("Portfolio PnL and Position PnL have unequal data points ({portfolio} vs {position})")]
    PortfolioPositionMismatch { portfolio: usize, position: usize },

    #[error("Portfolio PV and Position PV cannot be zero (portfolio: {portfolio_pv}, position: {position_pv})")]
    ZeroPresentValue { portfolio_pv: f64, position_pv: f64 },

    #[error("Combined portfolio PV is zero after applying the position weight")]
    ZeroCombinedValue,

    #[error("Invalid annualization factor: {0} (must be positive and finite)")]
    InvalidAnnualizationFactor(f64),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Market data error: {0}")]
    MarketData(String),
}

impl HdVarError {
    /// Whether this error reports a caller mistake rather than a failure
    /// inside the computation.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(
            self,
            HdVarError::NumericalInstability(_) | HdVarError::Config(_) | HdVarError::MarketData(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, HdVarError>;
