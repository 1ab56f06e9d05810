//! Bridge between weekday series and the forecasting model
//!
//! Every failure here is per (item, weekday) and non-fatal: the caller gets a
//! [`ForecastUnavailable`] reason and falls back to a history-only panel.

use crate::config::ForecastConfig;
use crate::error::Result;
use crate::models::linear_trend::LinearTrend;
use crate::models::{FittedForecast, Forecaster, Observation};
use crate::series::WeekdaySeries;
use chrono::NaiveDate;
use demand_math::{TrimPolicy, Unavailable};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Forecast for one (item, weekday), plus the trim that produced its input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub dates: Vec<NaiveDate>,
    pub point: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    /// Index in the full weekday series where the forecast input started
    pub trim_start: usize,
}

impl ForecastBundle {
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Point estimate for the furthest forecast period
    pub fn final_point(&self) -> Option<f64> {
        self.point.last().copied()
    }
}

/// Why no forecast was produced
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastUnavailable {
    /// The series failed a length or sparsity guard
    Guard(Unavailable),
    /// Too few labels resolved to calendar dates
    TooFewDates { parsed: usize, required: usize },
    /// The model could not be fitted or produced no usable prediction
    ModelFailed(String),
}

impl fmt::Display for ForecastUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastUnavailable::Guard(reason) => write!(f, "{}", reason),
            ForecastUnavailable::TooFewDates { parsed, required } => {
                write!(f, "only {} dates parsed, need {}", parsed, required)
            }
            ForecastUnavailable::ModelFailed(message) => write!(f, "model failed: {}", message),
        }
    }
}

/// Trims, guards and forecasts weekday series
#[derive(Debug, Clone)]
pub struct ForecastAdapter<F: Forecaster> {
    forecaster: F,
    policy: TrimPolicy,
    horizon: usize,
    reference_year: i32,
}

impl ForecastAdapter<LinearTrend> {
    /// Adapter over the bundled linear trend model
    pub fn from_config(config: &ForecastConfig, policy: TrimPolicy) -> Result<Self> {
        config.validate()?;
        let model = LinearTrend::new(config.interval_width, config.step_days)?;
        Ok(Self::new(model, policy, config.horizon, config.reference_year))
    }
}

impl<F: Forecaster> ForecastAdapter<F> {
    pub fn new(forecaster: F, policy: TrimPolicy, horizon: usize, reference_year: i32) -> Self {
        Self {
            forecaster,
            policy,
            horizon,
            reference_year,
        }
    }

    pub fn policy(&self) -> &TrimPolicy {
        &self.policy
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Guard, trim and forecast a full weekday series
    pub fn forecast_series(
        &self,
        series: &WeekdaySeries,
    ) -> std::result::Result<ForecastBundle, ForecastUnavailable> {
        let trimmed = self
            .policy
            .prepare(&series.quantities)
            .map_err(ForecastUnavailable::Guard)?;

        if trimmed.was_trimmed() {
            debug!(
                item = %series.item,
                weekday = %series.weekday,
                trim_start = trimmed.start,
                "trimmed pre-introduction history"
            );
        }

        let month_days = series.month_days();
        self.forecast_trimmed(&month_days[trimmed.start..], trimmed.values, trimmed.start)
    }

    /// Forecast an already trimmed series of `M/D` labels and quantities
    ///
    /// Labels that do not resolve to a date in the reference year are dropped
    /// before the observation floor is checked again.
    pub fn forecast_trimmed(
        &self,
        month_days: &[String],
        quantities: &[f64],
        trim_start: usize,
    ) -> std::result::Result<ForecastBundle, ForecastUnavailable> {
        let observations: Vec<Observation> = month_days
            .iter()
            .zip(quantities)
            .filter_map(|(label, &quantity)| {
                self.resolve_month_day(label)
                    .map(|date| Observation::new(date, quantity))
            })
            .collect();

        if observations.len() < self.policy.min_trimmed_observations {
            return Err(ForecastUnavailable::TooFewDates {
                parsed: observations.len(),
                required: self.policy.min_trimmed_observations,
            });
        }

        let prediction = self
            .forecaster
            .fit(&observations)
            .and_then(|fitted| fitted.predict(self.horizon))
            .map_err(|e| {
                warn!(model = self.forecaster.name(), error = %e, "forecast failed");
                ForecastUnavailable::ModelFailed(e.to_string())
            })?;

        let (dates, point, lower, upper) = prediction.into_parts();
        if point.iter().chain(&lower).chain(&upper).any(|v| !v.is_finite()) {
            warn!(model = self.forecaster.name(), "prediction is not finite");
            return Err(ForecastUnavailable::ModelFailed(
                "prediction is not finite".to_string(),
            ));
        }

        Ok(ForecastBundle {
            dates,
            point,
            lower,
            upper,
            trim_start,
        })
    }

    /// Resolve an `M/D` label against the reference year
    pub fn resolve_month_day(&self, label: &str) -> Option<NaiveDate> {
        let (month, day) = label.trim().split_once('/')?;
        NaiveDate::from_ymd_opt(
            self.reference_year,
            month.trim().parse().ok()?,
            day.trim().parse().ok()?,
        )
    }
}
