//! Dashboard state and selection handlers.
//!
//! [`Dashboard`] holds the dataset behind an [`Arc`] as process-wide
//! read-only state, precomputes the default view of each tab at startup, and
//! answers selection changes with fresh chart descriptions. Dispatch is a
//! synchronous pure computation; the same selection always yields the same
//! description.

use std::sync::Arc;

use pulse_core::chart::ChartDescription;
use pulse_core::models::{GroupBy, OVERALL};
use pulse_core::palette;

use pulse_data::aggregator::{Aggregator, CourseFilter, GroupKey};
use pulse_data::charts::ChartBuilder;
use pulse_data::reader::{Dataset, SelectOption};

/// Precomputed dashboard state plus the selection handlers.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    builder: ChartBuilder,
    default_group_chart: ChartDescription,
    default_daily_chart: ChartDescription,
}

impl Dashboard {
    /// Build the dashboard, precomputing the default chart of each tab.
    pub fn new(dataset: Arc<Dataset>, workspace_label: &str) -> Self {
        let builder = ChartBuilder::new(workspace_label);
        let default_group_chart = build_group_chart(&dataset, &builder, GroupBy::Module);
        let default_daily_chart = build_daily_chart(&dataset, &builder, &[OVERALL.to_string()]);

        Self {
            dataset,
            builder,
            default_group_chart,
            default_daily_chart,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Options for the course-filter selector (tab 2).
    pub fn selector_options(&self) -> Vec<SelectOption> {
        self.dataset.selector_options()
    }

    /// Default module/channel chart shown before any interaction.
    pub fn default_group_chart(&self) -> &ChartDescription {
        &self.default_group_chart
    }

    /// Default per-day chart (the `overall` series).
    pub fn default_daily_chart(&self) -> &ChartDescription {
        &self.default_daily_chart
    }

    /// Tab-1 handler: re-aggregate by the selected grouping dimension.
    pub fn on_group_by_changed(&self, group_by: GroupBy) -> ChartDescription {
        build_group_chart(&self.dataset, &self.builder, group_by)
    }

    /// Tab-2 handler: one line series per selected filter value, in
    /// selection order. Unknown course names yield empty series.
    pub fn on_courses_changed(&self, selected: &[String]) -> ChartDescription {
        build_daily_chart(&self.dataset, &self.builder, selected)
    }
}

// ── Chart assembly ────────────────────────────────────────────────────────────

fn build_group_chart(
    dataset: &Dataset,
    builder: &ChartBuilder,
    group_by: GroupBy,
) -> ChartDescription {
    let rows = Aggregator::aggregate(
        &dataset.records,
        &dataset.channels,
        GroupKey::from(group_by),
        &CourseFilter::Overall,
    );
    match group_by {
        GroupBy::Module => builder.module_chart(&rows),
        GroupBy::Channel => builder.channel_chart(&rows),
    }
}

fn build_daily_chart(
    dataset: &Dataset,
    builder: &ChartBuilder,
    selected: &[String],
) -> ChartDescription {
    let series = selected
        .iter()
        .map(|value| {
            let filter = CourseFilter::from_value(value);
            let color = series_color(dataset, value);
            let rows = Aggregator::aggregate(
                &dataset.records,
                &dataset.channels,
                GroupKey::Date,
                &filter,
            );
            ChartBuilder::daily_series(&rows, value, color)
        })
        .collect();

    builder.daily_chart(series)
}

/// Line color for a filter value: the overall color, or the color of the
/// course's module. Unknown courses fall back to the `others` color.
fn series_color(dataset: &Dataset, value: &str) -> &'static str {
    if value == OVERALL {
        return palette::OVERALL_LINE;
    }
    dataset
        .records
        .iter()
        .find(|r| r.course == value)
        .map(|r| palette::module_color(&r.module))
        .unwrap_or(palette::MODULE_FALLBACK)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pulse_core::models::{ChannelDirectory, ChannelInfo, MessageRecord};

    fn record(course: &str, module: &str, ymd: (i32, u32, u32), reactions: u64) -> MessageRecord {
        MessageRecord {
            course: course.to_string(),
            module: module.to_string(),
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            reaction_count: reactions,
            message_count: 1,
        }
    }

    fn channel(folder: &str, folder_name: &str, actual_name: &str) -> ChannelInfo {
        ChannelInfo {
            folder: folder.to_string(),
            folder_name: folder_name.to_string(),
            actual_name: actual_name.to_string(),
        }
    }

    fn sample_dashboard() -> Dashboard {
        let dataset = Dataset {
            records: vec![
                record("math101", "mod1_summer", (2019, 7, 1), 3),
                record("math101", "mod1_summer", (2019, 7, 3), 5),
                record("stats201", "mod2_fall1", (2019, 7, 2), 7),
                record("stats201", "mod2_fall1", (2019, 10, 15), 2),
            ],
            channels: ChannelDirectory::new(vec![
                channel("mod1_summer", "math101", "Linear Algebra"),
                channel("mod2_fall1", "stats201", "Statistics"),
            ]),
        };
        Dashboard::new(Arc::new(dataset), "MSDS")
    }

    // ── defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_group_chart_is_module_view() {
        let dashboard = sample_dashboard();
        let chart = dashboard.default_group_chart();
        assert_eq!(chart.x_axis.title, "Module");
        assert_eq!(chart.bar_series().len(), 2);
    }

    #[test]
    fn test_default_daily_chart_is_single_overall_series_spanning_range() {
        let dashboard = sample_dashboard();
        let chart = dashboard.default_daily_chart();

        let lines = chart.line_series();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "overall");
        assert_eq!(lines[0].color, palette::OVERALL_LINE);

        // The series spans the full date range of the dataset.
        let (min, max) = dashboard.dataset().date_range().unwrap();
        assert_eq!(lines[0].points.first().unwrap().date, min);
        assert_eq!(lines[0].points.last().unwrap().date, max);
    }

    // ── group-by selection ────────────────────────────────────────────────────

    #[test]
    fn test_on_group_by_changed_channel_view() {
        let dashboard = sample_dashboard();
        let chart = dashboard.on_group_by_changed(GroupBy::Channel);
        assert!(!chart.x_axis.show_tick_labels);
        assert_eq!(chart.bar_series().len(), 1);
        assert_eq!(chart.bar_series()[0].points.len(), 2);
    }

    // ── course selection ──────────────────────────────────────────────────────

    #[test]
    fn test_two_courses_yield_two_restricted_series() {
        let dashboard = sample_dashboard();
        let chart = dashboard
            .on_courses_changed(&["math101".to_string(), "stats201".to_string()]);

        let lines = chart.line_series();
        assert_eq!(lines.len(), 2);

        // Each series only carries dates from its own course.
        assert_eq!(lines[0].name, "math101");
        let math_dates: Vec<NaiveDate> = lines[0].points.iter().map(|p| p.date).collect();
        assert_eq!(
            math_dates,
            vec![
                NaiveDate::from_ymd_opt(2019, 7, 1).unwrap(),
                NaiveDate::from_ymd_opt(2019, 7, 3).unwrap(),
            ]
        );

        assert_eq!(lines[1].name, "stats201");
        assert_eq!(lines[1].points.len(), 2);
        assert_eq!(lines[1].color, palette::module_color("mod2_fall1"));
    }

    #[test]
    fn test_unknown_course_yields_empty_series_not_error() {
        let dashboard = sample_dashboard();
        let chart = dashboard.on_courses_changed(&["does_not_exist".to_string()]);

        let lines = chart.line_series();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].points.is_empty());
        assert_eq!(lines[0].color, palette::MODULE_FALLBACK);
    }

    #[test]
    fn test_empty_selection_yields_chart_with_no_series() {
        let dashboard = sample_dashboard();
        let chart = dashboard.on_courses_changed(&[]);
        assert!(chart.series.is_empty());
    }

    // ── determinism ───────────────────────────────────────────────────────────

    #[test]
    fn test_same_selection_yields_same_description() {
        let dashboard = sample_dashboard();
        let selection = vec!["overall".to_string(), "math101".to_string()];
        let first = dashboard.on_courses_changed(&selection);
        let second = dashboard.on_courses_changed(&selection);
        assert_eq!(first, second);
    }
}
