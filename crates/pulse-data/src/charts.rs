//! Chart-description assembly.
//!
//! Converts aggregate rows into the declarative [`ChartDescription`] values
//! consumed by the rendering surface. Layout constants (margins, the fixed
//! daily y-range, colors) live here and in [`pulse_core::palette`].

use pulse_core::chart::{
    AxisSpec, BarPoint, BarSeries, ChartDescription, Legend, LinePoint, LineSeries, Margin, Series,
};
use pulse_core::formatting::format_count;
use pulse_core::palette;

use crate::aggregator::AggregateRow;

/// Fixed y-range of the per-day chart.
const DAILY_Y_RANGE: (f64, f64) = (-100.0, 900.0);

/// Builds chart descriptions, carrying the workspace label used in titles.
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    workspace_label: String,
}

impl ChartBuilder {
    pub fn new(workspace_label: impl Into<String>) -> Self {
        Self {
            workspace_label: workspace_label.into(),
        }
    }

    /// Per-module comparison: one Reactions and one Messages bar series.
    pub fn module_chart(&self, rows: &[AggregateRow]) -> ChartDescription {
        let reactions = BarSeries {
            name: "Reactions".to_string(),
            fill: palette::REACTIONS_FILL.to_string(),
            outline: palette::REACTIONS_OUTLINE.to_string(),
            opacity: palette::BAR_OPACITY,
            points: rows
                .iter()
                .map(|row| BarPoint {
                    label: row.key.clone(),
                    value: row.reaction_count,
                    hover: row.hover_text.clone(),
                    color: None,
                })
                .collect(),
        };

        let messages = BarSeries {
            name: "Messages".to_string(),
            fill: palette::MESSAGES_FILL.to_string(),
            outline: palette::MESSAGES_OUTLINE.to_string(),
            opacity: palette::BAR_OPACITY,
            points: rows
                .iter()
                .map(|row| BarPoint {
                    label: row.key.clone(),
                    value: row.message_count,
                    hover: format!("Messages: {}", format_count(row.message_count)),
                    color: None,
                })
                .collect(),
        };

        ChartDescription {
            title: format!(
                "Number of reactions in Slack per module in {}",
                self.workspace_label
            ),
            x_axis: AxisSpec::titled("Module"),
            y_axis: AxisSpec::titled("Number of reactions"),
            margin: Margin::uniform(50),
            background: None,
            legend: None,
            series: vec![Series::Bar(reactions), Series::Bar(messages)],
        }
    }

    /// Per-channel comparison: one bar series with per-bar colors; tick
    /// labels are hidden since the hover text carries the description.
    pub fn channel_chart(&self, rows: &[AggregateRow]) -> ChartDescription {
        let reactions = BarSeries {
            name: "Reactions".to_string(),
            fill: palette::CHANNEL_DEFAULT.to_string(),
            outline: palette::CHANNEL_OUTLINE.to_string(),
            opacity: palette::BAR_OPACITY,
            points: rows
                .iter()
                .map(|row| BarPoint {
                    label: row.key.clone(),
                    value: row.reaction_count,
                    hover: row.hover_text.clone(),
                    color: row.color.clone(),
                })
                .collect(),
        };

        ChartDescription {
            title: format!(
                "Number of reactions in Slack per channel in {}",
                self.workspace_label
            ),
            x_axis: AxisSpec {
                title: "Channels (Hover for description)".to_string(),
                show_tick_labels: false,
                range: None,
            },
            y_axis: AxisSpec::titled("Number of reactions"),
            margin: Margin::uniform(50),
            background: Some(palette::PLOT_BACKGROUND.to_string()),
            legend: None,
            series: vec![Series::Bar(reactions)],
        }
    }

    /// One line series over date-grouped rows. Empty rows produce an empty
    /// series, never an error.
    pub fn daily_series(rows: &[AggregateRow], name: &str, color: &str) -> LineSeries {
        LineSeries {
            name: name.to_string(),
            color: color.to_string(),
            points: rows
                .iter()
                .filter_map(|row| {
                    row.date.map(|date| LinePoint {
                        date,
                        value: row.reaction_count,
                        hover: row.hover_text.clone(),
                    })
                })
                .collect(),
        }
    }

    /// Per-day time series with a fixed y-range and top-right legend.
    pub fn daily_chart(&self, series: Vec<LineSeries>) -> ChartDescription {
        ChartDescription {
            title: "Number of reactions per day".to_string(),
            x_axis: AxisSpec::titled("Days"),
            y_axis: AxisSpec {
                title: "Number of reactions".to_string(),
                show_tick_labels: true,
                range: Some(DAILY_Y_RANGE),
            },
            margin: Margin::uniform(50),
            background: Some(palette::PLOT_BACKGROUND.to_string()),
            legend: Some(Legend { x: 1.0, y: 1.0 }),
            series: series.into_iter().map(Series::Line).collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{Aggregator, CourseFilter, GroupKey};
    use chrono::NaiveDate;
    use pulse_core::models::{ChannelDirectory, MessageRecord};

    fn record(course: &str, module: &str, ymd: (i32, u32, u32), reactions: u64) -> MessageRecord {
        MessageRecord {
            course: course.to_string(),
            module: module.to_string(),
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            reaction_count: reactions,
            message_count: 1,
        }
    }

    fn sample_records() -> Vec<MessageRecord> {
        vec![
            record("math101", "mod1_summer", (2019, 7, 1), 3),
            record("cats_of_msds", "mod1_summer", (2019, 7, 2), 12),
            record("stats201", "mod2_fall1", (2019, 10, 15), 1),
        ]
    }

    fn rows(group_key: GroupKey) -> Vec<crate::aggregator::AggregateRow> {
        Aggregator::aggregate(
            &sample_records(),
            &ChannelDirectory::default(),
            group_key,
            &CourseFilter::Overall,
        )
    }

    // ── module_chart ──────────────────────────────────────────────────────────

    #[test]
    fn test_module_chart_has_two_bar_series() {
        let chart = ChartBuilder::new("MSDS").module_chart(&rows(GroupKey::Module));

        assert_eq!(
            chart.title,
            "Number of reactions in Slack per module in MSDS"
        );
        let bars = chart.bar_series();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].name, "Reactions");
        assert_eq!(bars[1].name, "Messages");
        assert_eq!(bars[0].fill, "#73973F");
        assert_eq!(bars[1].fill, "#E8821E");
        // Both series share the x labels, in ascending-reaction order.
        assert_eq!(bars[0].points[0].label, bars[1].points[0].label);
    }

    #[test]
    fn test_module_chart_messages_hover() {
        let chart = ChartBuilder::new("MSDS").module_chart(&rows(GroupKey::Module));
        let messages = &chart.bar_series()[1];
        let mod1 = messages.points.iter().find(|p| p.label == "mod1_summer");
        assert_eq!(mod1.unwrap().hover, "Messages: 2");
    }

    // ── channel_chart ─────────────────────────────────────────────────────────

    #[test]
    fn test_channel_chart_per_point_colors_and_hidden_ticks() {
        let chart = ChartBuilder::new("MSDS").channel_chart(&rows(GroupKey::Channel));

        assert!(!chart.x_axis.show_tick_labels);
        assert_eq!(chart.x_axis.title, "Channels (Hover for description)");
        assert_eq!(chart.background.as_deref(), Some("#FFFFFF"));

        let bars = chart.bar_series();
        assert_eq!(bars.len(), 1);
        let cats = bars[0].points.iter().find(|p| p.label == "cats_of_msds");
        assert_eq!(
            cats.unwrap().color.as_deref(),
            Some(palette::CHANNEL_HIGHLIGHT)
        );
    }

    // ── daily_series / daily_chart ────────────────────────────────────────────

    #[test]
    fn test_daily_chart_fixed_range_and_legend() {
        let series =
            ChartBuilder::daily_series(&rows(GroupKey::Date), "overall", palette::OVERALL_LINE);
        let chart = ChartBuilder::new("MSDS").daily_chart(vec![series]);

        assert_eq!(chart.title, "Number of reactions per day");
        assert_eq!(chart.y_axis.range, Some((-100.0, 900.0)));
        assert_eq!(chart.legend, Some(Legend { x: 1.0, y: 1.0 }));
        assert_eq!(chart.line_series().len(), 1);
        assert_eq!(chart.line_series()[0].points.len(), 3);
    }

    #[test]
    fn test_daily_series_empty_rows_produce_empty_series() {
        let series = ChartBuilder::daily_series(&[], "does_not_exist", palette::MODULE_FALLBACK);
        assert!(series.points.is_empty());

        let chart = ChartBuilder::new("MSDS").daily_chart(vec![series]);
        assert_eq!(chart.line_series().len(), 1);
        assert!(chart.has_no_points());
    }
}
