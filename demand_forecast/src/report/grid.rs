//! Weekday panel grid
//!
//! Each panel plots one weekday series by position: history first, then the
//! forecast periods continuing to the right. The y axis always starts at zero.

use crate::adapter::ForecastBundle;
use crate::error::Result;
use crate::report::canvas::{Canvas, AXIS, FORECAST, GRID, HISTORY, TEXT, TRIM_MARK, WHITE};
use crate::report::font::chart_font;
use ab_glyph::FontRef;
use demand_math::SeriesSummary;
use sales_ledger::DateLabel;

/// Width and height of one panel in pixels
pub const PANEL_SIZE: u32 = 600;
/// Panels per grid row
pub const GRID_COLUMNS: u32 = 3;
/// Height of the strip holding the figure title
pub const TITLE_HEIGHT: u32 = 60;

const LEFT: f64 = 64.0;
const RIGHT: f64 = 24.0;
const TOP: f64 = 56.0;
const BOTTOM: f64 = 64.0;
const GRID_LINES: usize = 5;
const HEADROOM: f64 = 1.1;
const BAND_ALPHA: f64 = 0.2;

const FIGURE_TITLE_SIZE: f32 = 28.0;
const PANEL_TITLE_SIZE: f32 = 22.0;
const TICK_SIZE: f32 = 13.0;
const LABEL_SIZE: f32 = 15.0;
const BOX_PADDING: i64 = 8;
const LINE_HEIGHT: i64 = 20;
const SWATCH: i64 = 24;

/// Data drawn in one panel
#[derive(Debug, Clone, Copy)]
pub struct Panel<'a> {
    pub title: &'a str,
    pub labels: &'a [DateLabel],
    pub quantities: &'a [f64],
    pub forecast: Option<&'a ForecastBundle>,
    pub summary: Option<SeriesSummary>,
    pub next_forecast: Option<f64>,
}

/// Plot area of a panel and the mapping from data to pixels
#[derive(Debug, Clone, Copy)]
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    history: usize,
    positions: usize,
    y_max: f64,
}

impl Frame {
    fn for_panel(panel: &Panel<'_>) -> Self {
        let horizon = panel.forecast.map_or(0, ForecastBundle::horizon);
        let forecast_values = panel
            .forecast
            .into_iter()
            .flat_map(|f| f.point.iter().chain(&f.upper));
        let peak = panel
            .quantities
            .iter()
            .chain(forecast_values)
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);

        Self {
            left: LEFT,
            right: f64::from(PANEL_SIZE) - RIGHT,
            top: TOP,
            bottom: f64::from(PANEL_SIZE) - BOTTOM,
            history: panel.quantities.len(),
            positions: panel.quantities.len() + horizon,
            y_max: if peak > 0.0 { peak * HEADROOM } else { 1.0 },
        }
    }

    fn x(&self, position: usize) -> f64 {
        if self.positions <= 1 {
            return (self.left + self.right) / 2.0;
        }
        self.left + (self.right - self.left) * position as f64 / (self.positions - 1) as f64
    }

    fn y(&self, value: f64) -> f64 {
        let clamped = value.clamp(0.0, self.y_max);
        self.bottom - (self.bottom - self.top) * clamped / self.y_max
    }

    fn point(&self, position: usize, value: f64) -> (f64, f64) {
        (self.x(position), self.y(value))
    }
}

/// Positions that get a vertical grid line and an x tick label
///
/// Roughly `GRID_LINES` evenly spaced positions, always ending on the last one.
pub fn tick_positions(positions: usize) -> Vec<usize> {
    if positions == 0 {
        return Vec::new();
    }
    let every = positions.div_ceil(GRID_LINES).max(1);
    let last = positions - 1;
    let mut ticks: Vec<usize> = (0..positions).step_by(every).collect();

    if let Some(&previous) = ticks.last() {
        if previous != last {
            if last - previous < every.div_ceil(2) {
                ticks.pop();
            }
            ticks.push(last);
        }
    }
    ticks
}

/// `M/D` for history positions, `F+n` for forecast positions
fn x_label(labels: &[DateLabel], history: usize, position: usize) -> String {
    if position >= history {
        return format!("F+{}", position - history + 1);
    }
    labels
        .get(position)
        .map(DateLabel::month_day)
        .unwrap_or_default()
}

fn y_label(value: f64, y_max: f64) -> String {
    if y_max < 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.0}", value)
    }
}

/// Lines of the statistics box, empty when the panel has no observations
pub fn stats_lines(summary: Option<SeriesSummary>, next_forecast: Option<f64>) -> Vec<String> {
    let Some(summary) = summary else {
        return Vec::new();
    };
    let mut lines = vec![
        format!("Avg: {:.1}", summary.mean),
        format!("Max: {:.0}", summary.max),
    ];
    if let Some(next) = next_forecast {
        lines.push(format!("Next: {:.1}", next));
    }
    lines
}

/// Lay panels out left to right, `GRID_COLUMNS` per row, under a title strip
pub fn render_grid(title: &str, panels: &[Panel<'_>]) -> Result<Canvas> {
    let font = chart_font()?;
    let rows = (panels.len().max(1) as u32).div_ceil(GRID_COLUMNS);
    let mut canvas = Canvas::new(
        PANEL_SIZE * GRID_COLUMNS,
        TITLE_HEIGHT + PANEL_SIZE * rows,
        WHITE,
    );

    let center = i64::from(canvas.width() / 2);
    canvas.centered_text(&font, FIGURE_TITLE_SIZE, (center, 14), TEXT, title);

    for (index, panel) in panels.iter().enumerate() {
        let column = index as u32 % GRID_COLUMNS;
        let row = index as u32 / GRID_COLUMNS;
        canvas.paste(
            &render_panel(panel, &font, index == 0),
            i64::from(column * PANEL_SIZE),
            i64::from(TITLE_HEIGHT + row * PANEL_SIZE),
        );
    }

    Ok(canvas)
}

pub fn render_panel(panel: &Panel<'_>, font: &FontRef<'_>, legend: bool) -> Canvas {
    let mut canvas = Canvas::new(PANEL_SIZE, PANEL_SIZE, WHITE);
    let frame = Frame::for_panel(panel);

    draw_grid(&mut canvas, &frame);
    draw_axis_labels(&mut canvas, &frame, panel.labels, font);
    canvas.centered_text(
        font,
        PANEL_TITLE_SIZE,
        (((frame.left + frame.right) / 2.0) as i64, 16),
        TEXT,
        panel.title,
    );

    let history = panel.quantities;
    if let (Some(forecast), Some(&last)) = (panel.forecast, history.last()) {
        let anchor = history.len() - 1;

        if forecast.trim_start > 0 {
            let x = frame.x(forecast.trim_start);
            canvas.dashed_line((x, frame.top), (x, frame.bottom), 1, TRIM_MARK, 6, 6);
        }

        let xs: Vec<f64> = (anchor..=anchor + forecast.horizon())
            .map(|p| frame.x(p))
            .collect();
        let lower: Vec<f64> = std::iter::once(last)
            .chain(forecast.lower.iter().copied())
            .map(|v| frame.y(v))
            .collect();
        let upper: Vec<f64> = std::iter::once(last)
            .chain(forecast.upper.iter().copied())
            .map(|v| frame.y(v))
            .collect();
        canvas.band(&xs, &lower, &upper, FORECAST, BAND_ALPHA);

        let mut previous = frame.point(anchor, last);
        for (step, &value) in forecast.point.iter().enumerate() {
            let current = frame.point(anchor + 1 + step, value);
            canvas.dashed_line(previous, current, 2, FORECAST, 8, 5);
            canvas.dot(current, 3, FORECAST);
            previous = current;
        }
    }

    for (position, pair) in history.windows(2).enumerate() {
        canvas.line(
            frame.point(position, pair[0]),
            frame.point(position + 1, pair[1]),
            2,
            HISTORY,
        );
    }
    for (position, &value) in history.iter().enumerate() {
        canvas.dot(frame.point(position, value), 4, HISTORY);
    }

    draw_stats_box(
        &mut canvas,
        &frame,
        &stats_lines(panel.summary, panel.next_forecast),
        font,
    );
    if legend {
        draw_legend(&mut canvas, &frame, panel.forecast.is_some(), font);
    }

    canvas
}

fn draw_grid(canvas: &mut Canvas, frame: &Frame) {
    for k in 0..=GRID_LINES {
        let y = frame.top + (frame.bottom - frame.top) * k as f64 / GRID_LINES as f64;
        canvas.line((frame.left, y), (frame.right, y), 1, GRID);
    }

    for position in tick_positions(frame.positions) {
        let x = frame.x(position);
        canvas.line((x, frame.top), (x, frame.bottom), 1, GRID);
    }

    canvas.outline_rect(
        frame.left as i64,
        frame.top as i64,
        frame.right as i64,
        frame.bottom as i64,
        AXIS,
    );
}

fn draw_axis_labels(canvas: &mut Canvas, frame: &Frame, labels: &[DateLabel], font: &FontRef<'_>) {
    for k in 0..=GRID_LINES {
        let value = frame.y_max * (GRID_LINES - k) as f64 / GRID_LINES as f64;
        let text = y_label(value, frame.y_max);
        let (width, height) = Canvas::measure(font, TICK_SIZE, &text);
        let y = frame.top + (frame.bottom - frame.top) * k as f64 / GRID_LINES as f64;
        canvas.text(
            font,
            TICK_SIZE,
            (frame.left as i64 - 6 - width, y as i64 - height / 2),
            TEXT,
            &text,
        );
    }

    for position in tick_positions(frame.positions) {
        let text = x_label(labels, frame.history, position);
        canvas.centered_text(
            font,
            TICK_SIZE,
            (frame.x(position) as i64, frame.bottom as i64 + 8),
            TEXT,
            &text,
        );
    }

    let center = ((frame.left + frame.right) / 2.0) as i64;
    canvas.centered_text(font, LABEL_SIZE, (center, frame.bottom as i64 + 32), TEXT, "Date");
}

/// Boxed statistics in the top-left corner of the plot area
fn draw_stats_box(canvas: &mut Canvas, frame: &Frame, lines: &[String], font: &FontRef<'_>) {
    if lines.is_empty() {
        return;
    }
    let widest = lines
        .iter()
        .map(|line| Canvas::measure(font, LABEL_SIZE, line).0)
        .max()
        .unwrap_or(0);
    let x0 = frame.left as i64 + BOX_PADDING;
    let y0 = frame.top as i64 + BOX_PADDING;
    let x1 = x0 + widest + 2 * BOX_PADDING;
    let y1 = y0 + LINE_HEIGHT * lines.len() as i64 + BOX_PADDING;

    canvas.fill_rect(x0, y0, x1, y1, WHITE);
    canvas.outline_rect(x0, y0, x1, y1, AXIS);
    for (index, line) in lines.iter().enumerate() {
        let y = y0 + BOX_PADDING / 2 + LINE_HEIGHT * index as i64;
        canvas.text(font, LABEL_SIZE, (x0 + BOX_PADDING, y), TEXT, line);
    }
}

/// Series key in the top-right corner of the plot area
fn draw_legend(canvas: &mut Canvas, frame: &Frame, with_forecast: bool, font: &FontRef<'_>) {
    let mut entries = vec![("Historical", HISTORY, false)];
    if with_forecast {
        entries.push(("Forecast", FORECAST, true));
    }

    let widest = entries
        .iter()
        .map(|(label, _, _)| Canvas::measure(font, LABEL_SIZE, label).0)
        .max()
        .unwrap_or(0);
    let x1 = frame.right as i64 - BOX_PADDING;
    let x0 = x1 - widest - SWATCH - 3 * BOX_PADDING;
    let y0 = frame.top as i64 + BOX_PADDING;
    let y1 = y0 + LINE_HEIGHT * entries.len() as i64 + BOX_PADDING;

    canvas.fill_rect(x0, y0, x1, y1, WHITE);
    canvas.outline_rect(x0, y0, x1, y1, AXIS);
    for (index, (label, color, dashed)) in entries.into_iter().enumerate() {
        let top = y0 + BOX_PADDING / 2 + LINE_HEIGHT * index as i64;
        let mid = (top + LINE_HEIGHT / 2) as f64;
        let from = ((x0 + BOX_PADDING) as f64, mid);
        let to = ((x0 + BOX_PADDING + SWATCH) as f64, mid);
        if dashed {
            canvas.dashed_line(from, to, 2, color, 8, 5);
        } else {
            canvas.line(from, to, 2, color);
        }
        canvas.text(
            font,
            LABEL_SIZE,
            (x0 + 2 * BOX_PADDING + SWATCH, top),
            TEXT,
            label,
        );
    }
}
