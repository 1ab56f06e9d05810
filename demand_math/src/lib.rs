//! # Demand Math
//!
//! Numeric building blocks for per-weekday demand forecasting.
//! This crate holds the series trimming heuristic, the summary statistics shown
//! next to each chart, and a small least-squares fit used by the trend model.

use thiserror::Error;

pub mod regression;
pub mod stats;
pub mod trim;

pub use regression::LeastSquaresFit;
pub use stats::SeriesSummary;
pub use trim::{trim_leading_gaps, TrimPolicy, TrimmedSeries, Unavailable};

/// Errors that can occur in demand calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for demand math operations
pub type Result<T> = std::result::Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = MathError::InsufficientData("need 2 points".to_string());
        assert_eq!(err.to_string(), "Insufficient data for calculation: need 2 points");
    }
}
