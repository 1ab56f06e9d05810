//! Linear trend model with prediction intervals
//!
//! No seasonal terms: each weekday is forecast from its own series, so the
//! within-series weekly cycle has already been removed.

use crate::error::{ForecastError, Result};
use crate::models::{FittedForecast, ForecastResult, Forecaster, Observation};
use chrono::{Duration, NaiveDate};
use demand_math::LeastSquaresFit;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Least-squares trend over calendar days
#[derive(Debug, Clone)]
pub struct LinearTrend {
    /// Name of the model
    name: String,
    /// Prediction interval coverage
    interval_width: f64,
    /// Days between forecast points
    step_days: i64,
}

/// Trend fitted to one series
#[derive(Debug, Clone)]
pub struct FittedLinearTrend {
    /// Name of the model
    name: String,
    fit: LeastSquaresFit,
    /// Day zero of the regressor
    origin: NaiveDate,
    /// Latest observed date; forecasts step forward from here
    last_date: NaiveDate,
    step_days: i64,
    /// Two-sided quantile multiplier for the interval
    quantile: f64,
}

impl LinearTrend {
    /// Create a new linear trend model
    pub fn new(interval_width: f64, step_days: i64) -> Result<Self> {
        if !(interval_width > 0.0 && interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter(
                "Interval width must be between 0 and 1".to_string(),
            ));
        }
        if step_days <= 0 {
            return Err(ForecastError::InvalidParameter(
                "Step must be a positive number of days".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Linear Trend ({:.0}% interval)", interval_width * 100.0),
            interval_width,
            step_days,
        })
    }

    fn quantile(&self, degrees_of_freedom: usize) -> Result<f64> {
        let p = 0.5 + self.interval_width / 2.0;
        let quantile = if degrees_of_freedom > 0 {
            StudentsT::new(0.0, 1.0, degrees_of_freedom as f64)
                .map_err(|e| ForecastError::ForecastingError(e.to_string()))?
                .inverse_cdf(p)
        } else {
            Normal::new(0.0, 1.0)
                .map_err(|e| ForecastError::ForecastingError(e.to_string()))?
                .inverse_cdf(p)
        };

        if !quantile.is_finite() {
            return Err(ForecastError::ForecastingError(format!(
                "Interval quantile for p={} is not finite",
                p
            )));
        }
        Ok(quantile)
    }
}

impl Forecaster for LinearTrend {
    type Fitted = FittedLinearTrend;

    fn fit(&self, observations: &[Observation]) -> Result<Self::Fitted> {
        let (origin, last_date) = match (
            observations.iter().map(|o| o.date).min(),
            observations.iter().map(|o| o.date).max(),
        ) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(ForecastError::DataError(
                    "Empty time series data".to_string(),
                ))
            }
        };

        let xs: Vec<f64> = observations
            .iter()
            .map(|o| (o.date - origin).num_days() as f64)
            .collect();
        let ys: Vec<f64> = observations.iter().map(|o| o.value).collect();

        let fit = LeastSquaresFit::fit(&xs, &ys)?;
        let quantile = self.quantile(fit.degrees_of_freedom())?;

        Ok(FittedLinearTrend {
            name: self.name.clone(),
            fit,
            origin,
            last_date,
            step_days: self.step_days,
            quantile,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedLinearTrend {
    pub fn slope_per_day(&self) -> f64 {
        self.fit.slope()
    }
}

impl FittedForecast for FittedLinearTrend {
    fn predict(&self, horizon: usize) -> Result<ForecastResult> {
        let mut dates = Vec::with_capacity(horizon);
        let mut values = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);

        for step in 1..=horizon as i64 {
            let date = self.last_date + Duration::days(self.step_days * step);
            let x = (date - self.origin).num_days() as f64;
            let estimate = self.fit.predict(x);
            let margin = self.quantile * self.fit.prediction_std_error(x);

            dates.push(date);
            values.push(estimate);
            lower.push(estimate - margin);
            upper.push(estimate + margin);
        }

        ForecastResult::new(dates, values, lower, upper)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
