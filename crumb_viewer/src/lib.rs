//! # Crumb Viewer
//!
//! Web viewer for the charts written by `demand_forecast::ReportWriter`.
//! Every request reads the plot directory afresh, so re-running the analysis
//! is picked up without restarting the server.
//!
//! Routes:
//!
//! - `GET /` lists every item with a chart
//! - `GET /item/:slug` shows one chart and its per-weekday statistics
//! - `GET /plot/:filename` serves the PNG with caching disabled
//! - `GET /api/plots` returns the chart list as JSON
//! - `GET /health` liveness probe

use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod catalog;
pub mod error;
pub mod pages;
pub mod routes;

pub use catalog::{list_plots, PlotEntry};
pub use error::{Result, ViewerError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host and port used when nothing else is configured
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct ViewerState {
    plot_dir: Arc<PathBuf>,
}

impl ViewerState {
    pub fn new<P: Into<PathBuf>>(plot_dir: P) -> Self {
        Self {
            plot_dir: Arc::new(plot_dir.into()),
        }
    }

    pub fn plot_dir(&self) -> &Path {
        &self.plot_dir
    }
}

pub fn router(state: ViewerState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/item/:slug", get(routes::item_detail))
        .route("/plot/:filename", get(routes::plot))
        .route("/api/plots", get(routes::api_plots))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(addr: SocketAddr, plot_dir: PathBuf) -> Result<()> {
    let plots = list_plots(&plot_dir).await;
    if plots.is_empty() {
        warn!(
            dir = %plot_dir.display(),
            "no plots found, run `crumbcast analyze` first"
        );
    } else {
        info!(count = plots.len(), dir = %plot_dir.display(), "serving plots");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ViewerError::Bind { addr, source })?;

    info!("crumb_viewer v{} listening on http://{}", VERSION, addr);
    axum::serve(listener, router(ViewerState::new(plot_dir))).await?;
    Ok(())
}
