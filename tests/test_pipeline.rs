use chrono::{Datelike, Duration, NaiveDate, Weekday};
use crumbcast::config::{AnalysisConfig, PathsConfig};
use crumbcast::pipeline::{run, run_quantity_analysis, run_visualization, Stage};
use crumbcast::PipelineError;
use demand_forecast::ItemReport;
use pretty_assertions::assert_eq;
use sales_ledger::QuantityMatrix;
use std::fmt::Write;
use std::path::Path;
use tempfile::TempDir;

const DAYS: i64 = 91;

/// Thirteen weeks of sales starting Tuesday 2024-01-02
fn export_csv() -> String {
    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut csv = String::from("Date,Time,Category,Item,Qty,Net Sales\n");

    for offset in 0..DAYS {
        let date = start + Duration::days(offset);
        let day = date.format("%Y-%m-%d");
        let qty = offset % 5 + 1;

        writeln!(csv, "{},08:00,Pastries,Egg Tart,{},$4.50", day, qty).unwrap();
        writeln!(csv, "{},09:00,Pastries,Crispy Egg Tart,1,$4.50", day).unwrap();
        writeln!(csv, "{},09:30,Bread,Sourdough,{},\"$1,200.00\"", day, 2 + offset / 7).unwrap();
        writeln!(csv, "{},10:00,Merch,Tote Bag,1,$15.00", day).unwrap();
        writeln!(csv, "{},10:30,Pastries,Easter Special Bun,3,$9.00", day).unwrap();
        // launched in week eight
        if offset >= 49 {
            writeln!(csv, "{},11:00,Croissant,Matcha Croissant,{},$5.00", day, qty).unwrap();
        }
    }
    csv
}

fn workspace() -> (TempDir, AnalysisConfig) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("data")).unwrap();
    std::fs::write(root.join("data/transaction-summary.csv"), export_csv()).unwrap();

    let config = AnalysisConfig {
        paths: PathsConfig {
            transactions: root.join("data/transaction-summary.csv"),
            matrix: root.join("data/quantity_per_day_per_item.csv"),
            plot_dir: root.join("reports/grid_plots"),
        },
        ..AnalysisConfig::default()
    };
    (dir, config)
}

fn report(dir: &Path, stem: &str) -> ItemReport {
    ItemReport::read_from_path(dir.join(format!("{}_grid_plot.json", stem))).unwrap()
}

#[test]
fn test_full_run_writes_matrix_and_charts() {
    let (_dir, config) = workspace();
    let summary = run(&config, Stage::All).unwrap();

    let aggregation = summary.aggregation.unwrap();
    assert_eq!(aggregation.unique_items, 3);
    assert!(aggregation.seasonal_removed > 0);

    let rendering = summary.rendering.unwrap();
    assert_eq!(rendering.items, 3);

    let plot_dir = &config.paths.plot_dir;
    for stem in ["Crispy_Egg_Tart", "Matcha_Croissant", "Sourdough"] {
        assert!(plot_dir.join(format!("{}_grid_plot.png", stem)).exists());
    }
    assert!(!plot_dir.join("Tote_Bag_grid_plot.png").exists());
    assert!(!plot_dir.join("Egg_Tart_grid_plot.png").exists());

    let egg_tart = report(plot_dir, "Crispy_Egg_Tart");
    assert_eq!(egg_tart.forecast_count(), 6);
    assert!(egg_tart.panels.iter().all(|p| p.trim_start == Some(0)));

    let matcha = report(plot_dir, "Matcha_Croissant");
    let tuesday = &matcha.panels[0];
    assert_eq!(tuesday.weekday, "Tuesday");
    assert_eq!(tuesday.observations, 13);
    assert_eq!(tuesday.trim_start, Some(7));
    // statistics cover the six weeks since launch only
    let stats = tuesday.summary.unwrap();
    assert_eq!(stats.max, 5.0);
    assert!((stats.mean - 20.0 / 6.0).abs() < 1e-9);
}

#[test]
fn test_matrix_excludes_closed_day_and_bad_date() {
    let (_dir, config) = workspace();
    let outcome = run_quantity_analysis(&config).unwrap();

    let matrix = QuantityMatrix::read_from_path(&config.paths.matrix).unwrap();
    assert_eq!(matrix, outcome.matrix);
    assert!(matrix.columns().iter().all(|c| c.weekday != Weekday::Mon));
    assert!(!matrix
        .columns()
        .iter()
        .any(|c| c.month == 1 && c.day == 14));

    let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let open_days = (0..DAYS)
        .map(|o| start + Duration::days(o))
        .filter(|d| d.weekday() != Weekday::Mon && !(d.month() == 1 && d.day() == 14))
        .count();
    assert_eq!(matrix.columns().len(), open_days);

    let egg_tart = matrix.row("Crispy Egg Tart").unwrap();
    // Egg Tart and Crispy Egg Tart rows merge: qty + 1 on the first day
    assert_eq!(egg_tart.quantities[0], 2.0);
}

#[test]
fn test_stages_run_independently() {
    let (_dir, config) = workspace();

    let quantity_only = run(&config, Stage::QuantityOnly).unwrap();
    assert!(quantity_only.rendering.is_none());
    assert!(!config.paths.plot_dir.exists());

    let rendering = run_visualization(&config).unwrap();
    assert_eq!(rendering.items, 3);
}

#[test]
fn test_visualization_needs_a_matrix() {
    let (_dir, config) = workspace();
    let result = run(&config, Stage::VisualizationOnly);
    assert!(matches!(result, Err(PipelineError::Ledger(_))));
}

#[test]
fn test_malformed_export_aborts_the_run() {
    let (dir, config) = workspace();
    std::fs::write(
        dir.path().join("data/transaction-summary.csv"),
        "Date,Item,Category,Qty,Net Sales\nnot-a-date,Sourdough,Bread,1,$4.00\n",
    )
    .unwrap();

    let result = run(&config, Stage::All);
    assert!(matches!(result, Err(PipelineError::Ledger(_))));
    assert!(!config.paths.matrix.exists());
}
