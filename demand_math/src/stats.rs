//! Summary statistics shown alongside each weekday chart

use serde::{Deserialize, Serialize};

/// Mean and maximum of a quantity series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    /// Arithmetic mean
    pub mean: f64,
    /// Largest observation
    pub max: f64,
}

impl SeriesSummary {
    /// Summarize a series, `None` when it is empty
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self { mean, max })
    }

    /// Summary for a chart panel
    ///
    /// When a forecast was produced from a trimmed series the statistics are
    /// taken over the post-introduction suffix, otherwise over everything.
    pub fn for_panel(values: &[f64], forecast_trim_start: Option<usize>) -> Option<Self> {
        match forecast_trim_start {
            Some(start) if start > 0 && start < values.len() => Self::of(&values[start..]),
            _ => Self::of(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summarizes_whole_series() {
        let summary = SeriesSummary::of(&[2.0, 4.0, 9.0, 1.0]).unwrap();
        assert_relative_eq!(summary.mean, 4.0);
        assert_relative_eq!(summary.max, 9.0);
    }

    #[test]
    fn test_empty_series_has_no_summary() {
        assert!(SeriesSummary::of(&[]).is_none());
    }

    #[test]
    fn test_panel_uses_suffix_after_trim() {
        let values = [0.0, 0.0, 0.0, 0.0, 6.0, 8.0];
        let summary = SeriesSummary::for_panel(&values, Some(4)).unwrap();
        assert_relative_eq!(summary.mean, 7.0);
        assert_relative_eq!(summary.max, 8.0);
    }

    #[test]
    fn test_panel_without_forecast_uses_everything() {
        let values = [0.0, 0.0, 0.0, 0.0, 6.0, 8.0];
        let summary = SeriesSummary::for_panel(&values, None).unwrap();
        assert_relative_eq!(summary.mean, 14.0 / 6.0);

        let untrimmed = SeriesSummary::for_panel(&values, Some(0)).unwrap();
        assert_eq!(summary, untrimmed);
    }
}
