//! # Crumbcast
//!
//! Bakery sales in, per-weekday demand charts out.
//!
//! The analysis runs in two stages that meet through a CSV file:
//!
//! 1. **Quantity analysis** loads the point-of-sale export, filters and
//!    normalizes it with [`sales_ledger`], and writes an item x date quantity
//!    matrix.
//! 2. **Visualization** reads the matrix, forecasts each weekday series with
//!    [`demand_forecast`], and renders one chart per item.
//!
//! The charts are then browsed with [`crumb_viewer`].
//!
//! ## Example
//!
//! ```no_run
//! use crumbcast::config::AnalysisConfig;
//! use crumbcast::pipeline::{run, Stage};
//!
//! # fn main() -> crumbcast::Result<()> {
//! let config = AnalysisConfig::load(None)?;
//! let summary = run(&config, Stage::All)?;
//! if let Some(rendering) = summary.rendering {
//!     println!("{} charts written", rendering.items);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod telemetry;

pub use config::AnalysisConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{run, Stage};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
