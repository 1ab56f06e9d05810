//! Per-item statistics written next to each chart

use crate::adapter::{ForecastBundle, ForecastUnavailable};
use crate::error::Result;
use crate::series::WeekdaySeries;
use demand_math::SeriesSummary;
use sales_ledger::weekday_name;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// What one weekday panel shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelReport {
    pub weekday: String,
    pub observations: usize,
    pub trim_start: Option<usize>,
    pub summary: Option<SeriesSummary>,
    /// Point estimate at the end of the forecast horizon
    pub next_forecast: Option<f64>,
    pub forecast: Option<ForecastBundle>,
    /// Why the panel is history-only
    pub unavailable: Option<String>,
}

impl PanelReport {
    pub fn build(
        series: &WeekdaySeries,
        outcome: &std::result::Result<ForecastBundle, ForecastUnavailable>,
    ) -> Self {
        let forecast = outcome.as_ref().ok();
        let trim_start = forecast.map(|f| f.trim_start);

        Self {
            weekday: weekday_name(series.weekday).to_string(),
            observations: series.len(),
            trim_start,
            summary: SeriesSummary::for_panel(&series.quantities, trim_start),
            next_forecast: forecast.and_then(ForecastBundle::final_point),
            forecast: forecast.cloned(),
            unavailable: outcome.as_ref().err().map(ToString::to_string),
        }
    }

    pub fn has_forecast(&self) -> bool {
        self.forecast.is_some()
    }
}

/// All panels for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    pub item: String,
    pub panels: Vec<PanelReport>,
}

impl ItemReport {
    pub fn forecast_count(&self) -> usize {
        self.panels.iter().filter(|p| p.has_forecast()).count()
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
