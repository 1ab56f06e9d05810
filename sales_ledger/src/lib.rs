//! # Sales Ledger
//!
//! `sales_ledger` turns a point-of-sale transaction export into the daily
//! item x date quantity matrix used for demand forecasting.
//!
//! ## Pipeline
//!
//! - **Loading**: parse the export, including currency formatted amounts
//! - **Aggregation**: filter by category, closed weekday and seasonal items,
//!   merge name variants and sum quantities per (date, item)
//! - **Pivot**: reshape into a matrix whose columns are grouped by weekday
//!
//! ## Usage Example
//!
//! ```no_run
//! use sales_ledger::{build_matrix, load_transactions_from_path, Aggregator, LedgerConfig, NameNormalizer};
//!
//! let config = LedgerConfig::default();
//! let transactions = load_transactions_from_path("data/transaction-summary.csv")?;
//! let (daily, report) = Aggregator::new(&config, NameNormalizer::builtin()).aggregate(&transactions);
//! let matrix = build_matrix(&daily, config.excluded_date);
//! matrix.write_to_path("data/quantity_per_day_per_item.csv")?;
//! println!("{} items kept", report.unique_items);
//! # Ok::<(), sales_ledger::LedgerError>(())
//! ```

use thiserror::Error;

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod matrix;
pub mod names;
pub mod pivot;
pub mod transaction;

pub use aggregate::{AggregationReport, Aggregator, DailyAggregate};
pub use calendar::{weekday_name, DateLabel, WEEKDAY_ORDER};
pub use config::{LedgerConfig, MonthDay};
pub use matrix::{MatrixRow, QuantityMatrix};
pub use names::NameNormalizer;
pub use pivot::build_matrix;
pub use transaction::{load_transactions, load_transactions_from_path, Transaction};

/// Errors that can occur while loading or reshaping sales data
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Malformed input at row {row}: {field} {value:?} ({reason})")]
    MalformedInput {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid date label: {0}")]
    InvalidLabel(String),

    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
