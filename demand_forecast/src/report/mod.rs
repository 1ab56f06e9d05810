//! Chart and summary output for every item in a quantity matrix

pub mod canvas;
pub mod font;
pub mod grid;
pub mod naming;
pub mod summary;

pub use grid::{render_grid, Panel};
pub use naming::{
    plot_file_name, plot_file_stem, summary_file_name, summary_for_plot, PLOT_SUFFIX,
    SUMMARY_SUFFIX,
};
pub use summary::{ItemReport, PanelReport};

use crate::adapter::{ForecastAdapter, ForecastUnavailable};
use crate::error::Result;
use crate::models::Forecaster;
use crate::series::WeekdaySeries;
use chrono::Weekday;
use sales_ledger::{MatrixRow, QuantityMatrix, WEEKDAY_ORDER};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Counts from one rendering pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub items: usize,
    pub panels: usize,
    pub forecasts: usize,
}

impl RenderSummary {
    pub fn unavailable(&self) -> usize {
        self.panels - self.forecasts
    }
}

/// Weekdays that get a panel, in panel order: those with at least one
/// matrix column
pub fn panel_weekdays(matrix: &QuantityMatrix) -> Vec<Weekday> {
    WEEKDAY_ORDER
        .iter()
        .copied()
        .filter(|&weekday| !matrix.columns_for(weekday).is_empty())
        .collect()
}

/// Heading drawn above an item's panel grid
pub fn chart_title(item: &str) -> String {
    format!("Weekday Sales Pattern with Forecast: {}", item)
}

/// Renders one chart and one JSON summary per item
#[derive(Debug, Clone)]
pub struct ReportWriter<F: Forecaster> {
    output_dir: PathBuf,
    adapter: ForecastAdapter<F>,
}

impl<F: Forecaster> ReportWriter<F> {
    pub fn new<P: Into<PathBuf>>(output_dir: P, adapter: ForecastAdapter<F>) -> Self {
        Self {
            output_dir: output_dir.into(),
            adapter,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Forecast every weekday panel of one item
    pub fn analyze_item(
        &self,
        matrix: &QuantityMatrix,
        row: &MatrixRow,
    ) -> Vec<(WeekdaySeries, PanelReport)> {
        panel_weekdays(matrix)
            .into_iter()
            .map(|weekday| {
                let series = WeekdaySeries::extract(matrix, row, weekday);
                let outcome = self.adapter.forecast_series(&series);
                if let Err(reason) = &outcome {
                    // Model failures are already reported by the adapter
                    if !matches!(reason, ForecastUnavailable::ModelFailed(_)) {
                        debug!(item = %row.item, weekday = %weekday, %reason, "forecast unavailable");
                    }
                }
                let report = PanelReport::build(&series, &outcome);
                (series, report)
            })
            .collect()
    }

    /// Write the chart and summary for one item into the output directory
    pub fn write_item(&self, matrix: &QuantityMatrix, row: &MatrixRow) -> Result<ItemReport> {
        let analyzed = self.analyze_item(matrix, row);

        let panels: Vec<Panel<'_>> = analyzed
            .iter()
            .map(|(series, report)| Panel {
                title: &report.weekday,
                labels: &series.labels,
                quantities: &series.quantities,
                forecast: report.forecast.as_ref(),
                summary: report.summary,
                next_forecast: report.next_forecast,
            })
            .collect();
        let plot_path = self.output_dir.join(plot_file_name(&row.item));
        render_grid(&chart_title(&row.item), &panels)?.save(&plot_path)?;

        let report = ItemReport {
            item: row.item.clone(),
            panels: analyzed.into_iter().map(|(_, report)| report).collect(),
        };
        report.write_to_path(self.output_dir.join(summary_file_name(&row.item)))?;

        debug!(
            item = %row.item,
            path = %plot_path.display(),
            forecasts = report.forecast_count(),
            "wrote item chart"
        );
        Ok(report)
    }

    /// Render every row of the matrix
    pub fn write_all(&self, matrix: &QuantityMatrix) -> Result<RenderSummary> {
        fs::create_dir_all(&self.output_dir)?;

        let mut summary = RenderSummary::default();
        for row in matrix.rows() {
            let report = self.write_item(matrix, row)?;
            summary.items += 1;
            summary.panels += report.panels.len();
            summary.forecasts += report.forecast_count();
        }

        info!(
            items = summary.items,
            forecasts = summary.forecasts,
            unavailable = summary.unavailable(),
            dir = %self.output_dir.display(),
            "rendered grid plots"
        );
        Ok(summary)
    }
}
