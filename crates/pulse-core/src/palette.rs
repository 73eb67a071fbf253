//! Dashboard color palette.
//!
//! All colors are hex strings carried inside chart descriptions; the
//! rendering surface decides how to realize them.

/// Fill for the per-module Reactions bar series.
pub const REACTIONS_FILL: &str = "#73973F";
/// Outline for the per-module Reactions bars.
pub const REACTIONS_OUTLINE: &str = "rgb(3,42,26)";
/// Fill for the per-module Messages bar series.
pub const MESSAGES_FILL: &str = "#E8821E";
/// Outline for the per-module Messages bars.
pub const MESSAGES_OUTLINE: &str = "rgb(90,55,6)";
/// Outline shared by all per-channel bars.
pub const CHANNEL_OUTLINE: &str = "#919194";

/// Highlight fill for cat- and dog-themed channels.
pub const CHANNEL_HIGHLIGHT: &str = "#A8228E";
/// Default fill for every other channel.
pub const CHANNEL_DEFAULT: &str = "#02B8A0";

/// Line color for the `overall` time series.
pub const OVERALL_LINE: &str = "#DED5B4";
/// Fallback line color for modules missing from the table below.
pub const MODULE_FALLBACK: &str = "#A8228E";

/// Bar opacity shared by every bar series.
pub const BAR_OPACITY: f64 = 0.6;
/// Plot background used by the channel and per-day charts.
pub const PLOT_BACKGROUND: &str = "#FFFFFF";

/// Per-module line colors for the time-series view.
const MODULE_COLORS: &[(&str, &str)] = &[
    ("mod1_summer", "#FDBB30"),
    ("mod2_fall1", "#EB821E"),
    ("mod3_fall2", "#CD542C"),
    ("mod4_winter", "#00B3D8"),
    ("mod5_spring1", "#02B8A0"),
    ("mod6_spring2", "#AED136"),
    ("mod7_summer", "#73973F"),
];

/// Line color for a module id, with the `others` fallback for unknown ids.
pub fn module_color(module: &str) -> &'static str {
    MODULE_COLORS
        .iter()
        .find(|(id, _)| *id == module)
        .map(|(_, color)| *color)
        .unwrap_or(MODULE_FALLBACK)
}

/// `true` for cat-themed channel names and hover strings.
pub fn is_cat_themed(text: &str) -> bool {
    text.contains("cats")
}

/// `true` for dog-themed channel names and hover strings.
pub fn is_dog_themed(text: &str) -> bool {
    text.contains("dogs")
}

/// Bar fill for a channel: highlight for the two special categories,
/// default teal otherwise.
pub fn channel_color(course: &str) -> &'static str {
    if is_cat_themed(course) || is_dog_themed(course) {
        CHANNEL_HIGHLIGHT
    } else {
        CHANNEL_DEFAULT
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_color_known() {
        assert_eq!(module_color("mod4_winter"), "#00B3D8");
        assert_eq!(module_color("mod7_summer"), "#73973F");
    }

    #[test]
    fn test_module_color_unknown_falls_back() {
        assert_eq!(module_color("mod99_nope"), MODULE_FALLBACK);
    }

    #[test]
    fn test_channel_color_special_categories() {
        assert_eq!(channel_color("cats_of_msds"), CHANNEL_HIGHLIGHT);
        assert_eq!(channel_color("dogs_of_msds"), CHANNEL_HIGHLIGHT);
        assert_eq!(channel_color("linear_algebra"), CHANNEL_DEFAULT);
    }

    #[test]
    fn test_theme_predicates() {
        assert!(is_cat_themed("Channel: cats_of_msds"));
        assert!(is_dog_themed("dogs_daily"));
        assert!(!is_cat_themed("stats201"));
    }
}
