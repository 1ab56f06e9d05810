//! Request handlers

use crate::catalog::{find_by_slug, is_servable, list_plots, load_report, PlotEntry};
use crate::error::{Result, ViewerError};
use crate::pages;
use crate::ViewerState;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

pub async fn index(State(state): State<ViewerState>) -> Html<String> {
    let plots = list_plots(state.plot_dir()).await;
    Html(pages::index_page(&plots))
}

pub async fn item_detail(
    State(state): State<ViewerState>,
    Path(slug): Path<String>,
) -> Result<Html<String>> {
    let plots = list_plots(state.plot_dir()).await;
    let plot = find_by_slug(&plots, &slug).ok_or(ViewerError::ItemNotFound)?;
    let report = load_report(state.plot_dir(), &plot.filename).await;
    Ok(Html(pages::item_page(plot, report.as_ref())))
}

/// Chart bytes, never cached so a re-run shows up on reload
pub async fn plot(
    State(state): State<ViewerState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    if !is_servable(&filename) {
        return Err(ViewerError::PlotNotFound);
    }

    let bytes = tokio::fs::read(state.plot_dir().join(&filename))
        .await
        .map_err(|_| ViewerError::PlotNotFound)?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (header::PRAGMA, "no-cache"),
            (header::EXPIRES, "0"),
        ],
        bytes,
    )
        .into_response())
}

pub async fn api_plots(State(state): State<ViewerState>) -> Json<Vec<PlotEntry>> {
    Json(list_plots(state.plot_dir()).await)
}

/// Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": crate::VERSION
    }))
}
