//! The two batch stages: quantity analysis and visualization
//!
//! The stages only meet through the matrix CSV, so either can be re-run on
//! its own.

use crate::config::AnalysisConfig;
use crate::error::Result;
use demand_forecast::{ForecastAdapter, RenderSummary, ReportWriter};
use sales_ledger::{
    build_matrix, load_transactions_from_path, AggregationReport, Aggregator, NameNormalizer,
    QuantityMatrix,
};
use tracing::info;

/// Which stages to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    All,
    QuantityOnly,
    VisualizationOnly,
}

impl Stage {
    fn runs_quantity(self) -> bool {
        matches!(self, Stage::All | Stage::QuantityOnly)
    }

    fn runs_visualization(self) -> bool {
        matches!(self, Stage::All | Stage::VisualizationOnly)
    }
}

/// Result of the quantity stage
#[derive(Debug, Clone)]
pub struct QuantityOutcome {
    pub report: AggregationReport,
    pub matrix: QuantityMatrix,
}

/// What a pipeline run produced
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub aggregation: Option<AggregationReport>,
    pub rendering: Option<RenderSummary>,
}

/// Load transactions, aggregate them and write the quantity matrix
pub fn run_quantity_analysis(config: &AnalysisConfig) -> Result<QuantityOutcome> {
    info!(path = %config.paths.transactions.display(), "running quantity analysis");

    let transactions = load_transactions_from_path(&config.paths.transactions)?;
    let aggregator = Aggregator::new(&config.ledger, NameNormalizer::builtin());
    let (daily, report) = aggregator.aggregate(&transactions);

    let matrix = build_matrix(&daily, config.ledger.excluded_date);
    matrix.write_to_path(&config.paths.matrix)?;

    info!(
        items = matrix.rows().len(),
        dates = matrix.columns().len(),
        total_quantity = report.total_quantity,
        path = %config.paths.matrix.display(),
        "quantity analysis complete"
    );
    Ok(QuantityOutcome { report, matrix })
}

/// Forecast and chart every item of an in-memory matrix
pub fn render_matrix(config: &AnalysisConfig, matrix: &QuantityMatrix) -> Result<RenderSummary> {
    let adapter = ForecastAdapter::from_config(&config.forecast, config.trim)?;
    let writer = ReportWriter::new(&config.paths.plot_dir, adapter);
    Ok(writer.write_all(matrix)?)
}

/// Read the matrix CSV and render charts from it
pub fn run_visualization(config: &AnalysisConfig) -> Result<RenderSummary> {
    info!(path = %config.paths.matrix.display(), "running visualization");
    let matrix = QuantityMatrix::read_from_path(&config.paths.matrix)?;
    render_matrix(config, &matrix)
}

/// Run the selected stages in order, stopping at the first failure
pub fn run(config: &AnalysisConfig, stage: Stage) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    if stage.runs_quantity() {
        summary.aggregation = Some(run_quantity_analysis(config)?.report);
    }
    if stage.runs_visualization() {
        summary.rendering = Some(run_visualization(config)?);
    }

    Ok(summary)
}
