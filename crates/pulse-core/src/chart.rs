//! Declarative chart descriptions.
//!
//! A [`ChartDescription`] is the full contract between the data pipeline and
//! the rendering surface: series, axis labels, hover text, and colors, with
//! no drawing logic. The surface is solely responsible for turning it into
//! pixels (or terminal cells).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Layout ────────────────────────────────────────────────────────────────────

/// One chart axis: title, tick-label visibility, optional fixed value range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub title: String,
    pub show_tick_labels: bool,
    /// Fixed `(min, max)` range; `None` means fit to the data.
    pub range: Option<(f64, f64)>,
}

impl AxisSpec {
    /// A plain titled axis with visible tick labels and no fixed range.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            show_tick_labels: true,
            range: None,
        }
    }
}

/// Whitespace reserved around the plot area, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub left: u16,
    pub right: u16,
    pub top: u16,
    pub bottom: u16,
}

impl Margin {
    /// The same margin on all four sides.
    pub fn uniform(size: u16) -> Self {
        Self {
            left: size,
            right: size,
            top: size,
            bottom: size,
        }
    }
}

/// Legend anchor in plot-fraction coordinates (1.0, 1.0 = top right).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub x: f64,
    pub y: f64,
}

// ── Series ────────────────────────────────────────────────────────────────────

/// One bar in a categorical series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    /// Group label shown on the x axis.
    pub label: String,
    pub value: u64,
    /// Multi-line descriptive text for this bar.
    pub hover: String,
    /// Per-bar fill override (hex string); `None` uses the series fill.
    pub color: Option<String>,
}

/// A categorical bar series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub name: String,
    /// Series fill color as a hex string, e.g. `"#73973F"`.
    pub fill: String,
    /// Bar outline color, e.g. `"rgb(3,42,26)"`.
    pub outline: String,
    pub opacity: f64,
    pub points: Vec<BarPoint>,
}

/// One point in a time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub date: NaiveDate,
    pub value: u64,
    pub hover: String,
}

/// A per-day line series (lines + markers in the original rendering).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<LinePoint>,
}

/// Any series a chart can carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Series {
    Bar(BarSeries),
    Line(LineSeries),
}

impl Series {
    pub fn name(&self) -> &str {
        match self {
            Series::Bar(s) => &s.name,
            Series::Line(s) => &s.name,
        }
    }
}

// ── ChartDescription ──────────────────────────────────────────────────────────

/// A complete, side-effect-free description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub title: String,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub margin: Margin,
    /// Plot background color; `None` leaves the surface default.
    pub background: Option<String>,
    pub legend: Option<Legend>,
    pub series: Vec<Series>,
}

impl ChartDescription {
    /// All bar series, in declaration order.
    pub fn bar_series(&self) -> Vec<&BarSeries> {
        self.series
            .iter()
            .filter_map(|s| match s {
                Series::Bar(b) => Some(b),
                Series::Line(_) => None,
            })
            .collect()
    }

    /// All line series, in declaration order.
    pub fn line_series(&self) -> Vec<&LineSeries> {
        self.series
            .iter()
            .filter_map(|s| match s {
                Series::Line(l) => Some(l),
                Series::Bar(_) => None,
            })
            .collect()
    }

    /// `true` when no series carries any data point.
    pub fn has_no_points(&self) -> bool {
        self.series.iter().all(|s| match s {
            Series::Bar(b) => b.points.is_empty(),
            Series::Line(l) => l.points.is_empty(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
