//! Per-day time-series view.
//!
//! Renders the reactions-per-day tab from a [`ChartDescription`]: one line
//! per series over a shared day axis, with the legend taken from the series
//! names. A detail panel shows every series' hover text for the date under
//! the cursor.

use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
    Frame,
};

use pulse_core::chart::ChartDescription;
use pulse_core::models::DATE_FORMAT;

use crate::bar_view::render_no_data;
use crate::themes::{series_color, Theme};

/// Sorted distinct dates across all series; the inspectable x positions.
pub fn detail_dates(chart: &ChartDescription) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = chart
        .line_series()
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.date))
        .collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Render the line chart into `area`.
pub fn render_line_view(frame: &mut Frame, area: Rect, chart: &ChartDescription, theme: &Theme) {
    let series = chart.line_series();
    let dates = detail_dates(chart);

    if series.is_empty() || dates.is_empty() {
        render_no_data(frame, area, &chart.title, theme);
        return;
    }

    let min_date = dates[0];
    let max_date = dates[dates.len() - 1];
    let span_days = (max_date - min_date).num_days().max(1) as f64;

    // Day offsets from the earliest date across all series.
    let series_data: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| {
            s.points
                .iter()
                .map(|p| ((p.date - min_date).num_days() as f64, p.value as f64))
                .collect()
        })
        .collect();

    let fallback = theme.axis.fg.unwrap_or_default();
    let datasets: Vec<Dataset> = series
        .iter()
        .zip(&series_data)
        .map(|(s, data)| {
            Dataset::default()
                .name(s.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(&s.color, fallback)))
                .data(data)
        })
        .collect();

    let (y_min, y_max) = chart.y_axis.range.unwrap_or_else(|| {
        let max = series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.value))
            .max()
            .unwrap_or(0) as f64;
        (0.0, max.max(1.0))
    });

    let x_axis = Axis::default()
        .title(Span::styled(chart.x_axis.title.clone(), theme.axis))
        .style(theme.axis)
        .bounds([0.0, span_days])
        .labels(vec![
            Line::from(min_date.format(DATE_FORMAT).to_string()),
            Line::from(max_date.format(DATE_FORMAT).to_string()),
        ]);

    let y_mid = (y_min + y_max) / 2.0;
    let y_axis = Axis::default()
        .title(Span::styled(chart.y_axis.title.clone(), theme.axis))
        .style(theme.axis)
        .bounds([y_min, y_max])
        .labels(vec![
            Line::from(format!("{:.0}", y_min)),
            Line::from(format!("{:.0}", y_mid)),
            Line::from(format!("{:.0}", y_max)),
        ]);

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(format!(" {} ", chart.title)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(widget, area);
}

/// Render each series' hover text for the date under `cursor`.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    chart: &ChartDescription,
    cursor: usize,
    theme: &Theme,
) {
    let dates = detail_dates(chart);
    let mut lines: Vec<Line> = Vec::new();

    match dates.get(cursor) {
        Some(date) => {
            lines.push(Line::from(Span::styled(
                date.format(DATE_FORMAT).to_string(),
                theme.bold,
            )));
            let fallback = theme.text.fg.unwrap_or_default();
            for series in chart.line_series() {
                if let Some(point) = series.points.iter().find(|p| p.date == *date) {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        series.name.clone(),
                        Style::default().fg(series_color(&series.color, fallback)),
                    )));
                    for hover_line in point.hover.lines() {
                        lines.push(Line::from(Span::styled(
                            hover_line.to_string(),
                            theme.text,
                        )));
                    }
                }
            }
        }
        None => {
            lines.push(Line::from(Span::styled("No selection", theme.dim)));
        }
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(" Details "),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
