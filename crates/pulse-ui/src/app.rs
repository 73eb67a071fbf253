//! Main application state and TUI event loop for Slack Pulse.
//!
//! [`App`] owns the theme, the current tab and selector state, and the last
//! chart description received for each tab. Selection keys re-dispatch
//! through the callback registry; rendering never touches the dataset.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Tabs},
    Frame, Terminal,
};

use pulse_core::chart::ChartDescription;
use pulse_core::models::OVERALL;
use pulse_data::reader::SelectOption;
use pulse_runtime::callbacks::{CallbackRegistry, InputValue, COURSES_INPUT, GROUP_BY_INPUT};
use pulse_runtime::dashboard::Dashboard;

use crate::bar_view;
use crate::components::header::Header;
use crate::components::selector::{render_selector, SelectorItem, SelectorKind};
use crate::line_view;
use crate::themes::Theme;

// ── TabId ─────────────────────────────────────────────────────────────────────

/// Which tab the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    /// Reactions per module/channel (bar charts).
    Groups,
    /// Reactions per day (time series).
    Daily,
}

const TAB_TITLES: [&str; 2] = ["Reactions per Module/Channel", "Reactions per day"];

/// Tab-1 selector options as `(label, input value)` pairs.
const GROUP_OPTIONS: [(&str, &str); 2] = [("Module", "module"), ("Channel", "channel")];

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Slack Pulse TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    workspace_label: String,
    registry: CallbackRegistry,
    course_options: Vec<SelectOption>,

    tab: TabId,
    group_cursor: usize,
    group_selected: usize,
    course_cursor: usize,
    selected_courses: Vec<String>,

    group_chart: ChartDescription,
    daily_chart: ChartDescription,
    detail_cursor: usize,

    should_quit: bool,
}

impl App {
    /// Construct the app around a prepared dashboard, starting on the
    /// module view with the `overall` course selected.
    pub fn new(theme_name: &str, dashboard: Arc<Dashboard>, workspace_label: String) -> Self {
        let course_options = dashboard.selector_options();
        let group_chart = dashboard.default_group_chart().clone();
        let daily_chart = dashboard.default_daily_chart().clone();
        let registry = CallbackRegistry::for_dashboard(dashboard);

        Self {
            theme: Theme::from_name(theme_name),
            workspace_label,
            registry,
            course_options,
            tab: TabId::Groups,
            group_cursor: 0,
            group_selected: 0,
            course_cursor: 0,
            selected_courses: vec![OVERALL.to_string()],
            group_chart,
            daily_chart,
            detail_cursor: 0,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI event loop until `q` / `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop
    /// redraws promptly without spinning.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.on_key(key);
                }
            }

            if self.should_quit {
                break;
            }
        }

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    // ── Input handling ────────────────────────────────────────────────────────

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.switch_tab(),
            KeyCode::Char('1') => self.set_tab(TabId::Groups),
            KeyCode::Char('2') => self.set_tab(TabId::Daily),
            KeyCode::Up => self.move_selector(-1),
            KeyCode::Down => self.move_selector(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.apply_selection(),
            KeyCode::Left => self.move_detail(-1),
            KeyCode::Right => self.move_detail(1),
            _ => {}
        }
    }

    fn switch_tab(&mut self) {
        let next = match self.tab {
            TabId::Groups => TabId::Daily,
            TabId::Daily => TabId::Groups,
        };
        self.set_tab(next);
    }

    fn set_tab(&mut self, tab: TabId) {
        if self.tab != tab {
            self.tab = tab;
            self.detail_cursor = 0;
        }
    }

    fn move_selector(&mut self, step: isize) {
        let (cursor, len) = match self.tab {
            TabId::Groups => (&mut self.group_cursor, GROUP_OPTIONS.len()),
            TabId::Daily => (&mut self.course_cursor, self.course_options.len()),
        };
        if len == 0 {
            return;
        }
        let next = (*cursor as isize + step).clamp(0, len as isize - 1);
        *cursor = next as usize;
    }

    fn move_detail(&mut self, step: isize) {
        let count = match self.tab {
            TabId::Groups => bar_view::detail_count(&self.group_chart),
            TabId::Daily => line_view::detail_dates(&self.daily_chart).len(),
        };
        if count == 0 {
            return;
        }
        let next = (self.detail_cursor as isize + step).clamp(0, count as isize - 1);
        self.detail_cursor = next as usize;
    }

    /// Apply the option under the selector cursor and re-dispatch the
    /// affected input through the callback registry.
    fn apply_selection(&mut self) {
        match self.tab {
            TabId::Groups => {
                self.group_selected = self.group_cursor;
                let value = GROUP_OPTIONS[self.group_selected].1;
                if let Some(chart) = self
                    .registry
                    .dispatch(GROUP_BY_INPUT, &InputValue::Single(value.to_string()))
                {
                    self.group_chart = chart;
                    self.detail_cursor = 0;
                }
            }
            TabId::Daily => {
                let Some(option) = self.course_options.get(self.course_cursor) else {
                    return;
                };
                let value = option.value.clone();
                match self.selected_courses.iter().position(|v| *v == value) {
                    Some(pos) => {
                        self.selected_courses.remove(pos);
                    }
                    None => self.selected_courses.push(value),
                }
                if let Some(chart) = self
                    .registry
                    .dispatch(COURSES_INPUT, &InputValue::Multi(self.selected_courses.clone()))
                {
                    self.daily_chart = chart;
                    self.detail_cursor = 0;
                }
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(frame.area());

        // Header.
        let header = Header::new(&self.workspace_label, &self.theme);
        frame.render_widget(Paragraph::new(header.to_lines()), chunks[0]);

        // Tab bar.
        let titles: Vec<Line> = TAB_TITLES.iter().map(|t| Line::from(*t)).collect();
        let tabs = Tabs::new(titles)
            .select(match self.tab {
                TabId::Groups => 0,
                TabId::Daily => 1,
            })
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active);
        frame.render_widget(tabs, chunks[1]);

        // Body: chart on the left, selector and details on the right.
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(chunks[2]);

        match self.tab {
            TabId::Groups => {
                bar_view::render_bar_view(frame, body[0], &self.group_chart, &self.theme)
            }
            TabId::Daily => {
                line_view::render_line_view(frame, body[0], &self.daily_chart, &self.theme)
            }
        }
        self.render_side_panel(frame, body[1]);

        // Footer hints.
        frame.render_widget(
            Paragraph::new("q quit · tab views · ↑/↓ move · space select · ←/→ inspect")
                .style(self.theme.dim),
            chunks[3],
        );
    }

    fn render_side_panel(&self, frame: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        match self.tab {
            TabId::Groups => {
                let items: Vec<SelectorItem> = GROUP_OPTIONS
                    .iter()
                    .enumerate()
                    .map(|(i, (label, _))| SelectorItem {
                        label: label.to_string(),
                        selected: i == self.group_selected,
                    })
                    .collect();
                render_selector(
                    frame,
                    halves[0],
                    "Reactions by...",
                    SelectorKind::Single,
                    &items,
                    self.group_cursor,
                    &self.theme,
                );
                bar_view::render_detail(
                    frame,
                    halves[1],
                    &self.group_chart,
                    self.detail_cursor,
                    &self.theme,
                );
            }
            TabId::Daily => {
                let items: Vec<SelectorItem> = self
                    .course_options
                    .iter()
                    .map(|option| SelectorItem {
                        label: option.label.clone(),
                        selected: self.selected_courses.contains(&option.value),
                    })
                    .collect();
                render_selector(
                    frame,
                    halves[0],
                    "Courses",
                    SelectorKind::Multi,
                    &items,
                    self.course_cursor,
                    &self.theme,
                );
                line_view::render_detail(
                    frame,
                    halves[1],
                    &self.daily_chart,
                    self.detail_cursor,
                    &self.theme,
                );
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pulse_core::models::{ChannelDirectory, ChannelInfo, MessageRecord};
    use pulse_data::reader::Dataset;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn record(course: &str, module: &str, ymd: (i32, u32, u32), reactions: u64) -> MessageRecord {
        MessageRecord {
            course: course.to_string(),
            module: module.to_string(),
            date: NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
            reaction_count: reactions,
            message_count: 1,
        }
    }

    fn sample_app() -> App {
        let dataset = Dataset {
            records: vec![
                record("math101", "mod1_summer", (2019, 7, 1), 3),
                record("math101", "mod1_summer", (2019, 7, 2), 5),
                record("stats201", "mod2_fall1", (2019, 7, 3), 7),
            ],
            channels: ChannelDirectory::new(vec![
                ChannelInfo {
                    folder: "mod1_summer".to_string(),
                    folder_name: "math101".to_string(),
                    actual_name: "Linear Algebra".to_string(),
                },
                ChannelInfo {
                    folder: "mod2_fall1".to_string(),
                    folder_name: "stats201".to_string(),
                    actual_name: "Statistics".to_string(),
                },
            ]),
        };
        let dashboard = Arc::new(Dashboard::new(Arc::new(dataset), "MSDS"));
        App::new("dark", dashboard, "MSDS".to_string())
    }

    // ── Initial state ─────────────────────────────────────────────────────────

    #[test]
    fn test_initial_state() {
        let app = sample_app();
        assert_eq!(app.tab, TabId::Groups);
        assert_eq!(app.selected_courses, vec![OVERALL.to_string()]);
        assert_eq!(app.group_chart.x_axis.title, "Module");
        assert_eq!(app.daily_chart.line_series().len(), 1);
    }

    // ── Quit keys ─────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = sample_app();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    // ── Tab switching ─────────────────────────────────────────────────────────

    #[test]
    fn test_tab_switching() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.tab, TabId::Daily);
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.tab, TabId::Groups);
        app.on_key(key(KeyCode::Char('2')));
        assert_eq!(app.tab, TabId::Daily);
    }

    // ── Group-by selection ────────────────────────────────────────────────────

    #[test]
    fn test_group_by_channel_selection_updates_chart() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Char(' ')));

        assert_eq!(app.group_selected, 1);
        assert_eq!(app.group_chart.x_axis.title, "Channels (Hover for description)");
        assert!(!app.group_chart.x_axis.show_tick_labels);
    }

    // ── Course selection ──────────────────────────────────────────────────────

    #[test]
    fn test_course_toggle_adds_and_removes_series() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('2')));

        // Options: overall, math101, stats201. Select math101.
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Char(' ')));
        assert_eq!(
            app.selected_courses,
            vec![OVERALL.to_string(), "math101".to_string()]
        );
        assert_eq!(app.daily_chart.line_series().len(), 2);

        // Toggling again removes it.
        app.on_key(key(KeyCode::Char(' ')));
        assert_eq!(app.selected_courses, vec![OVERALL.to_string()]);
        assert_eq!(app.daily_chart.line_series().len(), 1);
    }

    #[test]
    fn test_clearing_every_course_yields_empty_chart() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('2')));

        // Cursor starts on overall: deselect it.
        app.on_key(key(KeyCode::Char(' ')));
        assert!(app.selected_courses.is_empty());
        assert!(app.daily_chart.series.is_empty());
    }

    // ── Cursor clamping ───────────────────────────────────────────────────────

    #[test]
    fn test_selector_cursor_clamps() {
        let mut app = sample_app();
        app.on_key(key(KeyCode::Up));
        assert_eq!(app.group_cursor, 0);
        for _ in 0..10 {
            app.on_key(key(KeyCode::Down));
        }
        assert_eq!(app.group_cursor, GROUP_OPTIONS.len() - 1);
    }

    #[test]
    fn test_detail_cursor_clamps_to_chart_size() {
        let mut app = sample_app();
        // Two modules in the dataset.
        for _ in 0..10 {
            app.on_key(key(KeyCode::Right));
        }
        assert_eq!(app.detail_cursor, 1);
        app.on_key(key(KeyCode::Left));
        app.on_key(key(KeyCode::Left));
        assert_eq!(app.detail_cursor, 0);
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_groups_tab_does_not_panic() {
        let backend = TestBackend::new(120, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = sample_app();

        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn test_render_daily_tab_does_not_panic() {
        let backend = TestBackend::new(120, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = sample_app();
        app.on_key(key(KeyCode::Char('2')));

        terminal.draw(|frame| app.render(frame)).unwrap();
    }

    #[test]
    fn test_render_channel_view_does_not_panic() {
        let backend = TestBackend::new(120, 36);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = sample_app();
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Char(' ')));

        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
