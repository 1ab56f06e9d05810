//! Run configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "forecast": { "horizon": 6 }, "paths": { "plot_dir": "out/plots" } }
//! ```

use crate::error::{PipelineError, Result};
use demand_forecast::ForecastConfig;
use demand_math::TrimPolicy;
use sales_ledger::LedgerConfig;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Where the pipeline reads and writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Point-of-sale transaction export
    pub transactions: PathBuf,
    /// Item x date quantity matrix written by the first stage
    pub matrix: PathBuf,
    /// Output directory for charts and their summaries
    pub plot_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            transactions: PathBuf::from("data/transaction-summary.csv"),
            matrix: PathBuf::from("data/quantity_per_day_per_item.csv"),
            plot_dir: PathBuf::from("reports/grid_plots"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub paths: PathsConfig,
    pub ledger: LedgerConfig,
    pub trim: TrimPolicy,
    pub forecast: ForecastConfig,
}

impl AnalysisConfig {
    /// Read a JSON config file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// The file's settings when a path is given, defaults otherwise; validated
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.ledger.validate()?;
        self.forecast.validate()?;

        if self.trim.min_zero_run == 0 {
            return Err(PipelineError::Config(
                "trim.min_zero_run must be at least 1".to_string(),
            ));
        }
        // A trend line needs two points
        if self.trim.min_trimmed_observations < 2 {
            return Err(PipelineError::Config(
                "trim.min_trimmed_observations must be at least 2".to_string(),
            ));
        }
        if self.trim.min_raw_observations < self.trim.min_trimmed_observations {
            return Err(PipelineError::Config(format!(
                "trim.min_raw_observations ({}) is below trim.min_trimmed_observations ({})",
                self.trim.min_raw_observations, self.trim.min_trimmed_observations
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.paths.plot_dir, PathBuf::from("reports/grid_plots"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"forecast": {{"horizon": 6}}, "trim": {{"min_zero_run": 3}}, "ledger": {{"excluded_date": null}}}}"#
        )
        .unwrap();

        let config = AnalysisConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.forecast.horizon, 6);
        assert_eq!(config.forecast.interval_width, 0.8);
        assert_eq!(config.trim.min_zero_run, 3);
        assert_eq!(config.trim.min_raw_observations, 10);
        assert_eq!(config.ledger.excluded_date, None);
        assert_eq!(config.ledger.categories.len(), 4);
    }

    #[test]
    fn test_rejects_inconsistent_trim_floors() {
        let config = AnalysisConfig {
            trim: TrimPolicy {
                min_raw_observations: 3,
                ..TrimPolicy::default()
            },
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_nested_values() {
        let mut config = AnalysisConfig::default();
        config.ledger.categories.clear();
        assert!(matches!(config.validate(), Err(PipelineError::Ledger(_))));

        let mut config = AnalysisConfig::default();
        config.forecast.horizon = 0;
        assert!(matches!(config.validate(), Err(PipelineError::Forecast(_))));
    }
}
