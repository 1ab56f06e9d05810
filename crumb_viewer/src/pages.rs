//! HTML for the list and detail pages

use crate::catalog::PlotEntry;
use demand_forecast::{ItemReport, PanelReport};
use std::fmt::Write;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
a{color:#1f77b4;text-decoration:none}\
ul.plots{list-style:none;padding:0;display:flex;flex-wrap:wrap;gap:1rem}\
ul.plots li{width:240px}\
ul.plots img{width:240px;border:1px solid #ddd}\
img.chart{max-width:100%;border:1px solid #ddd}\
table{border-collapse:collapse;margin-top:1rem}\
td,th{border:1px solid #ddd;padding:.3rem .6rem;text-align:right}\
td:first-child,th:first-child,td:last-child{text-align:left}";

/// Escape text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

pub fn index_page(plots: &[PlotEntry]) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>Demand Forecasts</h1>");
    let _ = writeln!(body, "<p>{} items</p>", plots.len());

    if plots.is_empty() {
        let _ = writeln!(
            body,
            "<p>No plots yet. Run <code>crumbcast analyze</code> to render them.</p>"
        );
    } else {
        let _ = writeln!(body, "<ul class=\"plots\">");
        for plot in plots {
            let _ = writeln!(
                body,
                "<li><a href=\"/item/{slug}\"><img src=\"/plot/{file}\" alt=\"{name}\"><br>{name}</a></li>",
                slug = escape(&plot.slug()),
                file = escape(&plot.filename),
                name = escape(&plot.item_name),
            );
        }
        let _ = writeln!(body, "</ul>");
    }

    layout("Demand Forecasts", &body)
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v))
}

fn panel_note(panel: &PanelReport) -> String {
    match (&panel.unavailable, panel.trim_start) {
        (Some(reason), _) => format!("no forecast: {}", reason),
        (None, Some(start)) if start > 0 => format!("history trimmed at {}", start),
        _ => String::new(),
    }
}

pub fn item_page(plot: &PlotEntry, report: Option<&ItemReport>) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<p><a href=\"/\">All items</a></p>");
    let _ = writeln!(body, "<h1>{}</h1>", escape(&plot.item_name));
    let _ = writeln!(
        body,
        "<img class=\"chart\" src=\"/plot/{}\" alt=\"{}\">",
        escape(&plot.filename),
        escape(&plot.item_name)
    );

    if let Some(report) = report {
        let _ = writeln!(
            body,
            "<table>\n<tr><th>Weekday</th><th>Days</th><th>Mean</th><th>Max</th>\
             <th>Next</th><th>Note</th></tr>"
        );
        for panel in &report.panels {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&panel.weekday),
                panel.observations,
                number(panel.summary.map(|s| s.mean)),
                number(panel.summary.map(|s| s.max)),
                number(panel.next_forecast),
                escape(&panel_note(panel)),
            );
        }
        let _ = writeln!(body, "</table>");
    }

    layout(&plot.item_name, &body)
}
