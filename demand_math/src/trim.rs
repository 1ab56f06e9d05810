//! Trimming of "not yet launched" prefixes from weekday demand series
//!
//! A product that was introduced part way through the history shows up as a
//! long run of zero days followed by real sales. Forecasting over the zeros
//! drags the trend down, so the series is cut at the last point where sales
//! resume after such a run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Thresholds controlling trimming and the pre-forecast guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimPolicy {
    /// Consecutive zero observations that count as an introduction gap
    pub min_zero_run: usize,
    /// Raw observations required before trimming
    pub min_raw_observations: usize,
    /// Observations required to remain after trimming
    pub min_trimmed_observations: usize,
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self {
            min_zero_run: 4,
            min_raw_observations: 10,
            min_trimmed_observations: 5,
        }
    }
}

/// Suffix of a series that survived trimming
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimmedSeries<'a> {
    /// Index in the original series where the suffix starts
    pub start: usize,
    /// The retained observations
    pub values: &'a [f64],
}

impl TrimmedSeries<'_> {
    /// Whether anything was cut from the front
    pub fn was_trimmed(&self) -> bool {
        self.start > 0
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Why a series will not be handed to the forecaster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unavailable {
    /// Fewer raw observations than the policy requires
    TooFewObservations { found: usize, required: usize },
    /// Every observation is zero
    NoSales,
    /// Trimming left too little history
    TooShortAfterTrim {
        found: usize,
        required: usize,
        trim_start: usize,
    },
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::TooFewObservations { found, required } => {
                write!(f, "only {} observations, need {}", found, required)
            }
            Unavailable::NoSales => write!(f, "series has no sales"),
            Unavailable::TooShortAfterTrim {
                found,
                required,
                trim_start,
            } => write!(
                f,
                "{} observations left after trimming at {}, need {}",
                found, trim_start, required
            ),
        }
    }
}

/// Cut the series at the last point where sales resume after a zero run
///
/// Scans left to right counting consecutive zeros. Whenever a non-zero value
/// follows at least `min_zero_run` zeros its index becomes the candidate start;
/// the last candidate wins. Without any qualifying run the whole series is kept.
///
/// # Examples
///
/// ```
/// use demand_math::trim_leading_gaps;
///
/// let series = [0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 4.0, 0.0, 0.0, 0.0, 0.0, 2.0, 5.0, 6.0];
/// let trimmed = trim_leading_gaps(&series, 4);
/// assert_eq!(trimmed.start, 11);
/// assert_eq!(trimmed.values, &[2.0, 5.0, 6.0]);
/// ```
pub fn trim_leading_gaps(values: &[f64], min_zero_run: usize) -> TrimmedSeries<'_> {
    let mut start = 0;
    let mut zeros = 0;

    for (i, &value) in values.iter().enumerate() {
        if value == 0.0 {
            zeros += 1;
        } else {
            if zeros >= min_zero_run {
                start = i;
            }
            zeros = 0;
        }
    }

    TrimmedSeries {
        start,
        values: &values[start..],
    }
}

impl TrimPolicy {
    /// Apply the guards and the trim, returning the series to forecast from
    pub fn prepare<'a>(&self, values: &'a [f64]) -> Result<TrimmedSeries<'a>, Unavailable> {
        if values.len() < self.min_raw_observations {
            return Err(Unavailable::TooFewObservations {
                found: values.len(),
                required: self.min_raw_observations,
            });
        }

        if values.iter().sum::<f64>() == 0.0 {
            return Err(Unavailable::NoSales);
        }

        let trimmed = trim_leading_gaps(values, self.min_zero_run);
        if trimmed.len() < self.min_trimmed_observations {
            return Err(Unavailable::TooShortAfterTrim {
                found: trimmed.len(),
                required: self.min_trimmed_observations,
                trim_start: trimmed.start,
            });
        }

        Ok(trimmed)
    }
}
