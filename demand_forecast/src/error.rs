//! Error types for the demand_forecast crate

use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error related to forecasting operations
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error related to parameter validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from series math
    #[error("Math error: {0}")]
    MathError(#[from] demand_math::MathError),

    /// Error from loading or reshaping sales data
    #[error("Ledger error: {0}")]
    LedgerError(#[from] sales_ledger::LedgerError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error encoding a chart
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// Error loading the chart font
    #[error("Font error: {0}")]
    FontError(#[from] ab_glyph::InvalidFont),

    /// Error writing a report summary
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
