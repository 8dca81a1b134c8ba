//! Application state and TUI event loop for the attendance viewer.
//!
//! [`App`] owns the theme, the report cache and the cursor. Key handling is
//! separated from the terminal loop so it can be driven directly in tests.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::debug;

use clockin_core::formatting::format_month_long;
use clockin_core::models::{EmployeeMonth, YearMonth};
use clockin_core::punctuality::PunctualityPolicy;
use clockin_data::aggregator::{AttendanceAggregator, HistoryOrder, HistoryStyle};
use clockin_data::analysis::{MonthlyReport, ReportCache};
use clockin_data::observer::PipelineObserver;

use crate::components::{Header, OverviewLine};
use crate::history_view;
use crate::table_view;
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the attendance viewer.
pub struct App {
    pub theme: Theme,
    /// IANA timezone name shown in the header.
    pub timezone: String,
    pub policy: PunctualityPolicy,
    /// Month currently on screen.
    pub month: YearMonth,
    /// Row index into the current month's ranking.
    pub selected: usize,
    /// Whether the detail panel for the selected row is open.
    pub show_history: bool,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    cache: ReportCache,
    observer: Box<dyn PipelineObserver>,
}

impl App {
    /// Construct the viewer positioned on `month`.
    pub fn new(
        theme_name: &str,
        timezone: String,
        policy: PunctualityPolicy,
        cache: ReportCache,
        month: YearMonth,
        observer: Box<dyn PipelineObserver>,
    ) -> Self {
        let mut app = Self {
            theme: Theme::from_name(theme_name),
            timezone,
            policy,
            month,
            selected: 0,
            show_history: false,
            should_quit: false,
            cache,
            observer,
        };
        app.load_month(month);
        app
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the viewer until `q` / `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout on the current
    /// thread.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key)
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Every restore step runs even if an earlier one fails.
        let restored = first_error([
            disable_raw_mode(),
            execute!(terminal.backend_mut(), LeaveAlternateScreen),
            terminal.show_cursor(),
        ]);

        result.and(restored)
    }

    /// Apply one key press to the state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc => self.show_history = false,
            KeyCode::Enter => {
                if !self.current_employees().is_empty() {
                    self.show_history = !self.show_history;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.current_employees().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(older) = self.older_month() {
                    self.load_month(older);
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(newer) = self.newer_month() {
                    self.load_month(newer);
                }
            }
            _ => {}
        }
    }

    // ── Month navigation ──────────────────────────────────────────────────────

    /// Nearest month with data before the current one.
    pub fn older_month(&self) -> Option<YearMonth> {
        // Months are stored most recent first.
        self.cache
            .available_months()
            .iter()
            .copied()
            .find(|m| *m < self.month)
    }

    /// Nearest month with data after the current one.
    pub fn newer_month(&self) -> Option<YearMonth> {
        self.cache
            .available_months()
            .iter()
            .rev()
            .copied()
            .find(|m| *m > self.month)
    }

    fn load_month(&mut self, month: YearMonth) {
        debug!(%month, cached = self.cache.is_cached(month), "switching month");
        self.cache.report(month, self.observer.as_ref());
        self.month = month;
        self.selected = 0;
        self.show_history = false;
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn current_report(&self) -> Option<&MonthlyReport> {
        self.cache.get(self.month)
    }

    pub fn current_employees(&self) -> &[EmployeeMonth] {
        self.current_report()
            .map(|r| r.employees.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_employee(&self) -> Option<&EmployeeMonth> {
        self.current_employees().get(self.selected)
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, overview_area, body_area, help_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let period = format_month_long(&self.month);
        let header = Header::new(&period, &self.timezone, &self.theme).to_lines();
        frame.render_widget(Paragraph::new(Text::from(header)), header_area);

        let Some(report) = self.current_report().filter(|r| !r.is_empty()) else {
            table_view::render_no_data(frame, body_area, self.month, &self.theme);
            frame.render_widget(Paragraph::new(self.help_line()), help_area);
            return;
        };

        frame.render_widget(
            Paragraph::new(OverviewLine::new(&report.overview, &self.theme).to_line()),
            overview_area,
        );

        let (table_area, panel_area) = if self.show_history {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(body_area);
            (left, Some(right))
        } else {
            (body_area, None)
        };

        let rows = table_view::build_rows(&report.employees);
        table_view::render_table_view(
            frame,
            table_area,
            self.month,
            &rows,
            Some(self.selected),
            &self.theme,
        );

        if let (Some(area), Some(employee)) = (panel_area, self.selected_employee()) {
            let history = AttendanceAggregator::employee_history(
                self.cache.events(),
                employee.employee_id,
                self.month,
                HistoryOrder::Descending,
                HistoryStyle::Detailed,
                &self.policy,
            );
            history_view::render_history_view(frame, area, employee, &history, &self.theme);
        }

        frame.render_widget(Paragraph::new(self.help_line()), help_area);
    }

    fn help_line(&self) -> Line<'_> {
        let months = self.cache.available_months();
        let position = months
            .iter()
            .position(|m| *m == self.month)
            .map(|i| format!(" ({}/{})", i + 1, months.len()))
            .unwrap_or_default();
        Line::from(vec![
            Span::styled(
                "←/→ month  ↑/↓ select  Enter history  q quit",
                self.theme.dim,
            ),
            Span::styled(position, self.theme.dim),
        ])
    }
}

/// Collapse a run of already-executed steps into the first error, if any.
fn first_error(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    steps.into_iter().fold(Ok(()), |acc, step| acc.and(step))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
