//! # crumbcast
//!
//! Command-line entry point for the analysis pipeline and the chart viewer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crumbcast::config::AnalysisConfig;
use crumbcast::pipeline::{self, Stage};
use crumbcast::telemetry;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "crumbcast", version)]
#[command(about = "Bakery demand analysis and forecast charts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the quantity matrix and render forecast charts
    Analyze {
        /// Only aggregate transactions into the quantity matrix
        #[arg(long, conflicts_with = "viz_only")]
        quantity_only: bool,

        /// Only render charts from an existing quantity matrix
        #[arg(long)]
        viz_only: bool,

        /// JSON config file; defaults are used for anything it leaves out
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Serve the rendered charts over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = crumb_viewer::DEFAULT_HOST)]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, default_value_t = crumb_viewer::DEFAULT_PORT)]
        port: u16,

        /// Listen on all interfaces instead of `--host`
        #[arg(long)]
        public: bool,

        /// Chart directory; overrides the config file
        #[arg(long)]
        plot_dir: Option<PathBuf>,

        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn analyze(stage: Stage, config: Option<PathBuf>) -> Result<()> {
    let config = AnalysisConfig::load(config.as_deref()).context("failed to load config")?;
    let summary = pipeline::run(&config, stage).context("analysis failed")?;

    if let Some(rendering) = summary.rendering {
        info!(
            charts = rendering.items,
            forecasts = rendering.forecasts,
            unavailable = rendering.unavailable(),
            "analysis complete, start the viewer with `crumbcast serve`"
        );
    } else if let Some(aggregation) = summary.aggregation {
        info!(
            items = aggregation.unique_items,
            path = %config.paths.matrix.display(),
            "quantity matrix written"
        );
    }
    Ok(())
}

fn serve(
    host: IpAddr,
    port: u16,
    public: bool,
    plot_dir: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let plot_dir = match plot_dir {
        Some(dir) => dir,
        None => {
            AnalysisConfig::load(config.as_deref())
                .context("failed to load config")?
                .paths
                .plot_dir
        }
    };
    let host = if public {
        IpAddr::from([0, 0, 0, 0])
    } else {
        host
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime
        .block_on(crumb_viewer::serve(SocketAddr::new(host, port), plot_dir))
        .context("viewer stopped")
}

fn main() -> Result<()> {
    telemetry::init().context("failed to install log subscriber")?;

    match Cli::parse().command {
        Commands::Analyze {
            quantity_only,
            viz_only,
            config,
        } => {
            let stage = if viz_only {
                Stage::VisualizationOnly
            } else if quantity_only {
                Stage::QuantityOnly
            } else {
                Stage::All
            };
            analyze(stage, config)
        }
        Commands::Serve {
            host,
            port,
            public,
            plot_dir,
            config,
        } => serve(host, port, public, plot_dir, config),
    }
}
