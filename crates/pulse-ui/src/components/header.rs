use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Subtitle shown beneath the dashboard title.
pub const SUBTITLE: &str = "A dashboard for the craziest cohort of all";

/// Dashboard header rendering three lines:
///
/// 1. Workspace title.
/// 2. Subtitle.
/// 3. A 60-column `=` separator.
pub struct Header<'a> {
    /// Workspace label (e.g. "MSDS") shown in the title.
    pub workspace_label: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(workspace_label: &'a str, theme: &'a Theme) -> Self {
        Self {
            workspace_label,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly three lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(Span::styled(
                format!("{} - Slack Reactions", self.workspace_label),
                self.theme.header,
            )),
            Line::from(Span::styled(SUBTITLE, self.theme.subtitle)),
            Line::from(Span::styled(separator, self.theme.separator)),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
