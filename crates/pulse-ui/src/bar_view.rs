//! Categorical bar chart view.
//!
//! Renders the module/channel comparison tab from a [`ChartDescription`]:
//! one bar group per category, one bar per series, colored from the hex
//! strings the chart builder emitted. A detail panel shows the hover text of
//! the category under the cursor, standing in for mouse hover.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use pulse_core::chart::ChartDescription;
use pulse_core::formatting::format_count;

use crate::themes::{series_color, Theme};

/// Number of inspectable categories in the chart.
pub fn detail_count(chart: &ChartDescription) -> usize {
    chart
        .bar_series()
        .first()
        .map(|s| s.points.len())
        .unwrap_or(0)
}

/// Render the bar chart into `area`.
pub fn render_bar_view(frame: &mut Frame, area: Rect, chart: &ChartDescription, theme: &Theme) {
    let series = chart.bar_series();
    if series.is_empty() || chart.has_no_points() {
        render_no_data(frame, area, &chart.title, theme);
        return;
    }

    let n_groups = series.iter().map(|s| s.points.len()).max().unwrap_or(0);
    let bars_per_group = series.len();

    // Fit all groups into the available width, one gap column per group.
    let width_budget = area.width.saturating_sub(2) as usize;
    let slots = n_groups.max(1) * (bars_per_group + 1);
    let bar_width = (width_budget / slots.max(1)).clamp(1, 9) as u16;

    let mut barchart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(format!(" {} ", chart.title)),
        )
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(1);

    let mut groups: Vec<BarGroup> = Vec::with_capacity(n_groups);
    for i in 0..n_groups {
        let label = if chart.x_axis.show_tick_labels {
            series[0]
                .points
                .get(i)
                .map(|p| p.label.clone())
                .unwrap_or_default()
        } else {
            String::new()
        };

        let bars: Vec<Bar> = series
            .iter()
            .filter_map(|s| {
                s.points.get(i).map(|point| {
                    let spec = point.color.as_deref().unwrap_or(&s.fill);
                    let color = series_color(spec, theme.axis.fg.unwrap_or_default());
                    Bar::default()
                        .value(point.value)
                        .text_value(format_count(point.value))
                        .style(Style::default().fg(color))
                        .value_style(Style::default().fg(color).add_modifier(Modifier::REVERSED))
                })
            })
            .collect();

        groups.push(BarGroup::default().label(Line::from(label)).bars(&bars));
    }

    for group in groups {
        barchart = barchart.data(group);
    }

    frame.render_widget(barchart, area);
}

/// Render the hover text of the category under `cursor`.
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    chart: &ChartDescription,
    cursor: usize,
    theme: &Theme,
) {
    let series = chart.bar_series();
    let mut lines: Vec<Line> = Vec::new();

    let point = series.first().and_then(|s| s.points.get(cursor));
    match point {
        Some(point) => {
            lines.push(Line::from(Span::styled(point.label.clone(), theme.bold)));
            for s in &series {
                if let Some(point) = s.points.get(cursor) {
                    lines.push(Line::from(""));
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

/// Render a placeholder when the chart has no data points.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No reaction data to display", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Adjust the selection or check the input files.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(format!(" {} ", title)),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
