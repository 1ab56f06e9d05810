//! Discovery of rendered charts on disk

use demand_forecast::report::{summary_for_plot, PLOT_SUFFIX};
use demand_forecast::ItemReport;
use serde::Serialize;
use std::path::Path;
use tracing::warn;

/// One chart available for viewing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotEntry {
    pub filename: String,
    pub item_name: String,
    pub path: String,
}

impl PlotEntry {
    pub fn from_filename(dir: &Path, filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            item_name: item_name(filename),
            path: dir.join(filename).display().to_string(),
        }
    }

    /// URL slug for the item page
    pub fn slug(&self) -> String {
        self.item_name.to_lowercase().replace(' ', "_")
    }
}

/// Display name derived from a chart file name
pub fn item_name(filename: &str) -> String {
    filename
        .strip_suffix(PLOT_SUFFIX)
        .or_else(|| filename.strip_suffix(".png"))
        .unwrap_or(filename)
        .replace('_', " ")
}

/// Whether a requested file name can be served from the plot directory
pub fn is_servable(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains(['/', '\\'])
        && !filename.contains("..")
        && filename.ends_with(".png")
}

/// Every `*.png` in the directory, sorted by item name
///
/// A missing or unreadable directory is treated as empty.
pub async fn list_plots(dir: &Path) -> Vec<PlotEntry> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut plots = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let name = entry.file_name();
                if let Some(filename) = name.to_str().filter(|f| f.ends_with(".png")) {
                    plots.push(PlotEntry::from_filename(dir, filename));
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "stopped reading plot directory");
                break;
            }
        }
    }

    plots.sort_by(|a, b| a.item_name.cmp(&b.item_name));
    plots
}

/// Case-insensitive lookup by item slug
pub fn find_by_slug<'a>(plots: &'a [PlotEntry], slug: &str) -> Option<&'a PlotEntry> {
    let wanted = slug.to_lowercase();
    plots.iter().find(|plot| plot.slug() == wanted)
}

/// Statistics sidecar for a chart, if one was written and parses
pub async fn load_report(dir: &Path, plot_filename: &str) -> Option<ItemReport> {
    let path = dir.join(summary_for_plot(plot_filename)?);
    let text = tokio::fs::read_to_string(&path).await.ok()?;
    match serde_json::from_str(&text) {
        Ok(report) => Some(report),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable plot summary");
            None
        }
    }
}
