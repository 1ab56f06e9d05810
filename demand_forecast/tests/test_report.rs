use chrono::{Duration, NaiveDate, Weekday};
use demand_forecast::report::{panel_weekdays, plot_file_name, summary_file_name};
use demand_forecast::{
    FittedForecast, ForecastAdapter, ForecastConfig, ForecastError, ForecastResult, Forecaster,
    ItemReport, Observation, ReportWriter,
};
use demand_math::TrimPolicy;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_ledger::{DateLabel, MatrixRow, QuantityMatrix, WEEKDAY_ORDER};
use tempfile::tempdir;

const WEEKS: usize = 12;

/// Twelve weeks of columns for every weekday except `closed`, grouped by weekday
fn shop_matrix(closed: Option<Weekday>) -> QuantityMatrix {
    // 2024-01-02 is a Tuesday
    let first_tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let weekdays: Vec<Weekday> = WEEKDAY_ORDER
        .iter()
        .copied()
        .filter(|&w| Some(w) != closed)
        .collect();

    let mut columns = Vec::new();
    for weekday in &weekdays {
        let offset = (weekday.num_days_from_monday() + 6) % 7;
        for week in 0..WEEKS {
            let date = first_tuesday + Duration::days(i64::from(offset) + 7 * week as i64);
            columns.push(DateLabel::from_date(date));
        }
    }

    let growing = MatrixRow {
        item: "Egg Tart".to_string(),
        quantities: (0..columns.len())
            .map(|i| 5.0 + (i % WEEKS) as f64)
            .collect(),
    };
    // introduced in week 9: too little history after trimming
    let late_launch = MatrixRow {
        item: "Pain au Chocolat's".to_string(),
        quantities: (0..columns.len())
            .map(|i| if i % WEEKS < 8 { 0.0 } else { 4.0 })
            .collect(),
    };

    QuantityMatrix::new(columns, vec![growing, late_launch]).unwrap()
}

fn writer(dir: &std::path::Path) -> ReportWriter<demand_forecast::LinearTrend> {
    let adapter =
        ForecastAdapter::from_config(&ForecastConfig::default(), TrimPolicy::default()).unwrap();
    ReportWriter::new(dir, adapter)
}

/// Model that either refuses to fit or predicts NaN
#[derive(Debug, Clone, Copy)]
enum Faulty {
    FitFails,
    NanPrediction,
}

#[derive(Debug)]
struct NanFit {
    last: NaiveDate,
}

impl FittedForecast for NanFit {
    fn predict(&self, horizon: usize) -> demand_forecast::Result<ForecastResult> {
        let dates = (1..=horizon as i64)
            .map(|k| self.last + Duration::days(7 * k))
            .collect();
        ForecastResult::new(
            dates,
            vec![f64::NAN; horizon],
            vec![0.0; horizon],
            vec![1.0; horizon],
        )
    }

    fn name(&self) -> &str {
        "nan"
    }
}

impl Forecaster for Faulty {
    type Fitted = NanFit;

    fn fit(&self, observations: &[Observation]) -> demand_forecast::Result<NanFit> {
        match self {
            Faulty::FitFails => Err(ForecastError::ForecastingError("boom".to_string())),
            Faulty::NanPrediction => Ok(NanFit {
                last: observations.last().map(|o| o.date).unwrap(),
            }),
        }
    }

    fn name(&self) -> &str {
        "faulty"
    }
}

#[test]
fn test_writes_chart_and_summary_per_item() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("grid_plots");
    let matrix = shop_matrix(Some(Weekday::Mon));

    let summary = writer(&output).write_all(&matrix).unwrap();
    assert_eq!(summary.items, 2);
    assert_eq!(summary.panels, 12);
    assert_eq!(summary.forecasts, 6);
    assert_eq!(summary.unavailable(), 6);

    let plot = output.join("Egg_Tart_grid_plot.png");
    assert!(plot.exists());
    let image = image::open(&plot).unwrap();
    assert_eq!((image.width(), image.height()), (1800, 1260));

    assert!(output.join(plot_file_name("Pain au Chocolat's")).exists());
}

#[test]
fn test_summary_sidecar_round_trips() {
    let dir = tempdir().unwrap();
    let matrix = shop_matrix(Some(Weekday::Mon));
    writer(dir.path()).write_all(&matrix).unwrap();

    let report =
        ItemReport::read_from_path(dir.path().join(summary_file_name("Egg Tart"))).unwrap();
    let weekdays: Vec<&str> = report.panels.iter().map(|p| p.weekday.as_str()).collect();
    assert_eq!(
        weekdays,
        vec!["Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
    );
    assert!(report.panels.iter().all(|p| p.observations == WEEKS));
    assert!(report.panels.iter().all(|p| p.next_forecast.is_some()));

    let late =
        ItemReport::read_from_path(dir.path().join(summary_file_name("Pain au Chocolat's")))
            .unwrap();
    assert_eq!(late.forecast_count(), 0);
    assert!(late.panels.iter().all(|p| p.unavailable.is_some()));
    // history-only panels summarize the whole series
    assert_eq!(late.panels[0].summary.unwrap().max, 4.0);
}

#[test]
fn test_monday_panel_only_when_present() {
    assert_eq!(panel_weekdays(&shop_matrix(Some(Weekday::Mon))).len(), 6);

    let with_monday = panel_weekdays(&shop_matrix(None));
    assert_eq!(with_monday.len(), 7);
    assert_eq!(with_monday.last(), Some(&Weekday::Mon));
}

#[test]
fn test_closed_weekday_gets_no_panel() {
    let matrix = shop_matrix(Some(Weekday::Sun));
    let weekdays = panel_weekdays(&matrix);
    assert_eq!(
        weekdays,
        vec![
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Mon
        ]
    );

    let dir = tempdir().unwrap();
    writer(dir.path()).write_all(&matrix).unwrap();
    let report =
        ItemReport::read_from_path(dir.path().join(summary_file_name("Egg Tart"))).unwrap();
    assert!(report.panels.iter().all(|p| p.weekday != "Sunday"));
    assert_eq!(report.panels.len(), 6);
}

#[rstest]
#[case(Faulty::FitFails, "model failed: Forecasting error: boom")]
#[case(Faulty::NanPrediction, "model failed: prediction is not finite")]
fn test_model_failure_leaves_history_only_panels(#[case] model: Faulty, #[case] reason: &str) {
    let dir = tempdir().unwrap();
    let adapter = ForecastAdapter::new(model, TrimPolicy::default(), 4, 2024);
    let matrix = shop_matrix(Some(Weekday::Mon));

    let summary = ReportWriter::new(dir.path(), adapter)
        .write_all(&matrix)
        .unwrap();
    assert_eq!(summary.items, 2);
    assert_eq!(summary.forecasts, 0);

    for item in ["Egg Tart", "Pain au Chocolat's"] {
        assert!(dir.path().join(plot_file_name(item)).exists());
    }

    let report =
        ItemReport::read_from_path(dir.path().join(summary_file_name("Egg Tart"))).unwrap();
    for panel in &report.panels {
        assert_eq!(panel.unavailable.as_deref(), Some(reason));
        assert!(panel.next_forecast.is_none());
        // statistics fall back to the whole series
        assert_eq!(panel.summary.unwrap().max, 16.0);
    }
}

#[test]
fn test_seven_panels_need_a_third_row() {
    let dir = tempdir().unwrap();
    writer(dir.path()).write_all(&shop_matrix(None)).unwrap();

    let image = image::open(dir.path().join("Egg_Tart_grid_plot.png")).unwrap();
    assert_eq!((image.width(), image.height()), (1800, 1860));
}

#[test]
fn test_unwritable_output_is_an_error() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"x").unwrap();

    assert!(writer(&blocker).write_all(&shop_matrix(Some(Weekday::Mon))).is_err());
}
