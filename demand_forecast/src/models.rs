//! Forecasting models for demand series
//!
//! The pipeline only talks to models through [`Forecaster`] and
//! [`FittedForecast`], so the concrete model can be swapped without touching
//! the adapter or the reports.

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Debug;

/// One dated observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Point forecasts with prediction interval bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl ForecastResult {
    /// Create a forecast result, checking all sequences line up
    pub fn new(
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Result<Self> {
        let horizon = values.len();
        if dates.len() != horizon || lower.len() != horizon || upper.len() != horizon {
            return Err(ForecastError::ValidationError(format!(
                "Forecast sequences differ in length: {} dates, {} values, {} lower, {} upper",
                dates.len(),
                horizon,
                lower.len(),
                upper.len()
            )));
        }

        Ok(Self {
            dates,
            values,
            lower,
            upper,
        })
    }

    /// Dates of the forecast points
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Point estimates
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Lower interval bounds
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper interval bounds
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    pub fn into_parts(self) -> (Vec<NaiveDate>, Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.dates, self.values, self.lower, self.upper)
    }
}

/// A model fitted to one series
pub trait FittedForecast: Debug {
    /// Forecast the next `horizon` periods after the fitted data
    fn predict(&self, horizon: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// A forecasting model that can be fitted to a series
pub trait Forecaster: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedForecast;

    /// Fit the model to the observations
    fn fit(&self, observations: &[Observation]) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod linear_trend;
