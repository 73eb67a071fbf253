use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by pulse-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub subtitle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Selector ─────────────────────────────────────────────────────────────
    pub selector_item: Style,
    pub selector_selected: Style,
    pub selector_cursor: Style,

    // ── Chart chrome ─────────────────────────────────────────────────────────
    pub chart_border: Style,
    pub axis: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,
    pub error: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            selector_item: Style::default().fg(Color::White),
            selector_selected: Style::default().fg(Color::Green),
            selector_cursor: Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),

            chart_border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            subtitle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            selector_item: Style::default().fg(Color::Black),
            selector_selected: Style::default().fg(Color::Blue),
            selector_cursor: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            chart_border: Style::default().fg(Color::Gray),
            axis: Style::default().fg(Color::DarkGray),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maximise compatibility with minimal terminal
    /// emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            subtitle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),

            tab_active: Style::default().fg(Color::Cyan),
            tab_inactive: Style::default().fg(Color::Gray),

            selector_item: Style::default().fg(Color::White),
            selector_selected: Style::default().fg(Color::Cyan),
            selector_cursor: Style::default().fg(Color::Black).bg(Color::Cyan),

            chart_border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),

            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }
}

// ── Series colors ─────────────────────────────────────────────────────────────

/// Parse a chart-description color into a terminal color.
///
/// Accepts `"#RRGGBB"` hex strings and `"rgb(r,g,b)"` triples, the two
/// formats the chart builder emits.
pub fn parse_color(spec: &str) -> Option<Color> {
    let spec = spec.trim();

    if let Some(hex) = spec.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }

    if let Some(body) = spec
        .strip_prefix("rgb(")
        .and_then(|s| s.strip_suffix(')'))
    {
        let mut parts = body.split(',').map(|p| p.trim().parse::<u8>());
        let r = parts.next()?.ok()?;
        let g = parts.next()?.ok()?;
        let b = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        return Some(Color::Rgb(r, g, b));
    }

    None
}

/// Parse a series color, falling back to `fallback` for unknown formats.
pub fn series_color(spec: &str, fallback: Color) -> Color {
    parse_color(spec).unwrap_or(fallback)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_known_themes() {
        // Distinguish themes by their header style.
        assert_eq!(Theme::from_name("light").header, Theme::light().header);
        assert_eq!(Theme::from_name("dark").header, Theme::dark().header);
        assert_eq!(Theme::from_name("classic").header, Theme::classic().header);
    }

    #[test]
    fn test_parse_color_hex() {
        assert_eq!(parse_color("#73973F"), Some(Color::Rgb(0x73, 0x97, 0x3F)));
        assert_eq!(parse_color("#ffffff"), Some(Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_color_rgb_triple() {
        assert_eq!(parse_color("rgb(3,42,26)"), Some(Color::Rgb(3, 42, 26)));
        assert_eq!(parse_color("rgb(90, 55, 6)"), Some(Color::Rgb(90, 55, 6)));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert_eq!(parse_color("#123"), None);
        assert_eq!(parse_color("rgb(1,2)"), None);
        assert_eq!(parse_color("teal"), None);
    }

    #[test]
    fn test_series_color_fallback() {
        assert_eq!(series_color("not-a-color", Color::Gray), Color::Gray);
        assert_eq!(
            series_color("#02B8A0", Color::Gray),
            Color::Rgb(0x02, 0xB8, 0xA0)
        );
    }
}
