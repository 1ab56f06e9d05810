//! # Demand Forecast
//!
//! Per-weekday demand forecasting for bakery items, and the grid charts that
//! present it.
//!
//! ## Features
//!
//! - Weekday series extraction from a `sales_ledger::QuantityMatrix`
//! - Leading-gap trimming and sufficiency guards before any model is fitted
//! - A linear trend model with Student t prediction intervals
//! - PNG grid charts with titles, tick labels and per-panel statistics, plus a
//!   JSON statistics sidecar per item
//!
//! A series that is too short or too sparse never fails the run: its panel is
//! drawn history-only and the reason is recorded in the sidecar.
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::{ForecastAdapter, ForecastConfig, ReportWriter};
//! use demand_math::TrimPolicy;
//! use sales_ledger::QuantityMatrix;
//!
//! # fn main() -> demand_forecast::Result<()> {
//! let matrix = QuantityMatrix::read_from_path("data/quantity_per_day_per_item.csv")?;
//! let adapter = ForecastAdapter::from_config(&ForecastConfig::default(), TrimPolicy::default())?;
//!
//! let writer = ReportWriter::new("reports/grid_plots", adapter);
//! let summary = writer.write_all(&matrix)?;
//! println!("{} charts, {} forecasts", summary.items, summary.forecasts);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod series;

// Re-export commonly used types
pub use crate::adapter::{ForecastAdapter, ForecastBundle, ForecastUnavailable};
pub use crate::config::ForecastConfig;
pub use crate::error::{ForecastError, Result};
pub use crate::models::linear_trend::LinearTrend;
pub use crate::models::{FittedForecast, ForecastResult, Forecaster, Observation};
pub use crate::report::{ItemReport, PanelReport, RenderSummary, ReportWriter};
pub use crate::series::WeekdaySeries;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
