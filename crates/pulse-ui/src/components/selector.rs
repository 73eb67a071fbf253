//! Selector list widget.
//!
//! Terminal stand-in for the original dropdowns: a bordered list with a
//! movable cursor, rendered with radio markers for single-select inputs and
//! checkboxes for multi-select inputs.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::themes::Theme;

/// Selection behaviour of a selector input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// Exactly one option active at a time.
    Single,
    /// Any number of options active.
    Multi,
}

/// One selectable option.
#[derive(Debug, Clone)]
pub struct SelectorItem {
    pub label: String,
    pub selected: bool,
}

/// Render the selector list into `area`.
pub fn render_selector(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    kind: SelectorKind,
    items: &[SelectorItem],
    cursor: usize,
    theme: &Theme,
) {
    // Two columns of border, four of selection marker.
    let label_width = (area.width.saturating_sub(2) as usize).saturating_sub(4);

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = match (kind, item.selected) {
                (SelectorKind::Single, true) => "(•) ",
                (SelectorKind::Single, false) => "( ) ",
                (SelectorKind::Multi, true) => "[x] ",
                (SelectorKind::Multi, false) => "[ ] ",
            };
            let style = if i == cursor {
                theme.selector_cursor
            } else if item.selected {
                theme.selector_selected
            } else {
                theme.selector_item
            };
            let label = truncate_to_width(&item.label, label_width);
            ListItem::new(Line::from(Span::styled(
                format!("{}{}", marker, label),
                style,
            )))
        })
        .collect();

    let list = List::new(list_items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.chart_border)
            .title(format!(" {} ", title)),
    );

    frame.render_widget(list, area);
}

/// Truncate `label` to at most `max_width` terminal columns, appending an
/// ellipsis when anything was cut. Width-aware so emoji and wide glyphs
/// don't overflow the panel.
fn truncate_to_width(label: &str, max_width: usize) -> String {
    if label.width() <= max_width {
        return label.to_string();
    }

    let mut out = String::new();
    let mut used = 0usize;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
