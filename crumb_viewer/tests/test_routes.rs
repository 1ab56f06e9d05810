use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use crumb_viewer::{router, ViewerState};
use demand_forecast::{ItemReport, PanelReport};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really an image";

fn plot_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Sourdough_grid_plot.png"), PNG_BYTES).unwrap();
    std::fs::write(dir.path().join("Egg_Tart_grid_plot.png"), PNG_BYTES).unwrap();
    std::fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let report = ItemReport {
        item: "Egg Tart".to_string(),
        panels: vec![PanelReport {
            weekday: "Tuesday".to_string(),
            observations: 8,
            trim_start: None,
            summary: None,
            next_forecast: None,
            forecast: None,
            unavailable: Some("only 8 observations, need 10".to_string()),
        }],
    };
    report
        .write_to_path(dir.path().join("Egg_Tart_grid_plot.json"))
        .unwrap();
    dir
}

fn app(dir: &Path) -> Router {
    router(ViewerState::new(dir))
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn test_index_lists_items_alphabetically() {
    let dir = plot_dir();
    let (status, _, body) = get(app(dir.path()), "/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("2 items"));
    let egg = html.find("/item/egg_tart").unwrap();
    let sourdough = html.find("/item/sourdough").unwrap();
    assert!(egg < sourdough);
}

#[tokio::test]
async fn test_plot_is_served_without_caching() {
    let dir = plot_dir();
    let (status, headers, body) = get(app(dir.path()), "/plot/Sourdough_grid_plot.png").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, PNG_BYTES);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(
        headers.get(header::CACHE_CONTROL).unwrap(),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(headers.get(header::PRAGMA).unwrap(), "no-cache");
    assert_eq!(headers.get(header::EXPIRES).unwrap(), "0");
}

#[tokio::test]
async fn test_missing_plot_is_not_found() {
    let dir = plot_dir();
    let (status, _, body) = get(app(dir.path()), "/plot/Baguette_grid_plot.png").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "Plot not found");
}

#[tokio::test]
async fn test_traversal_is_not_found() {
    let dir = plot_dir();
    let (status, _, _) = get(app(dir.path()), "/plot/..%2Fsecret.png").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_item_page_shows_statistics() {
    let dir = plot_dir();
    let (status, _, body) = get(app(dir.path()), "/item/EGG_TART").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h1>Egg Tart</h1>"));
    assert!(html.contains("/plot/Egg_Tart_grid_plot.png"));
    assert!(html.contains("no forecast: only 8 observations, need 10"));
}

#[tokio::test]
async fn test_unknown_item_is_not_found() {
    let dir = plot_dir();
    let (status, _, body) = get(app(dir.path()), "/item/baguette").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(String::from_utf8(body).unwrap(), "Item not found");
}

#[tokio::test]
async fn test_api_lists_plots() {
    let dir = plot_dir();
    let (status, _, body) = get(app(dir.path()), "/api/plots").await;
    let plots: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = plots
        .iter()
        .map(|p| p["item_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Egg Tart", "Sourdough"]);
    assert_eq!(plots[0]["filename"], "Egg_Tart_grid_plot.png");
}

#[tokio::test]
async fn test_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, body) = get(app(&dir.path().join("absent")), "/api/plots").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"[]");
}

#[tokio::test]
async fn test_health_reports_alive() {
    let dir = plot_dir();
    let (status, _, body) = get(app(dir.path()), "/health").await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "alive");
}
