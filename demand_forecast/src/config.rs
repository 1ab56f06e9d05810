//! Forecast settings

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// How forecasts are produced for each weekday series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Future periods to predict
    pub horizon: usize,
    /// Coverage of the prediction interval, in (0, 1)
    pub interval_width: f64,
    /// Year used to resolve `M/D` matrix labels into dates
    pub reference_year: i32,
    /// Days between consecutive forecast points
    pub step_days: i64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: 4,
            interval_width: 0.8,
            reference_year: 2024,
            step_days: 7,
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1".to_string(),
            ));
        }
        if !(self.interval_width > 0.0 && self.interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter(
                "Interval width must be between 0 and 1".to_string(),
            ));
        }
        if self.step_days <= 0 {
            return Err(ForecastError::InvalidParameter(
                "Step must be a positive number of days".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_weekly_chart() {
        let config = ForecastConfig::default();
        assert_eq!(config.horizon, 4);
        assert_eq!(config.step_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        for config in [
            ForecastConfig {
                horizon: 0,
                ..ForecastConfig::default()
            },
            ForecastConfig {
                interval_width: 1.0,
                ..ForecastConfig::default()
            },
            ForecastConfig {
                step_days: 0,
                ..ForecastConfig::default()
            },
        ] {
            assert!(matches!(
                config.validate(),
                Err(ForecastError::InvalidParameter(_))
            ));
        }
    }
}
