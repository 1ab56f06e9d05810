//! Artifact file names

/// Suffix of the rendered chart for an item
pub const PLOT_SUFFIX: &str = "_grid_plot.png";

/// Suffix of the JSON statistics written next to each chart
pub const SUMMARY_SUFFIX: &str = "_grid_plot.json";

/// Filesystem-safe stem for an item name
///
/// Keeps alphanumerics, `_`, `-` and whitespace, then turns spaces into
/// underscores.
pub fn plot_file_stem(item: &str) -> String {
    item.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

pub fn plot_file_name(item: &str) -> String {
    format!("{}{}", plot_file_stem(item), PLOT_SUFFIX)
}

pub fn summary_file_name(item: &str) -> String {
    format!("{}{}", plot_file_stem(item), SUMMARY_SUFFIX)
}

/// Summary sidecar name for a chart file name
pub fn summary_for_plot(plot_file: &str) -> Option<String> {
    plot_file
        .strip_suffix(PLOT_SUFFIX)
        .map(|stem| format!("{}{}", stem, SUMMARY_SUFFIX))
}
