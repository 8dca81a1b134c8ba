//! Monthly attendance table for the viewer.
//!
//! Renders a bordered [`ratatui::widgets::Table`] with one row per employee,
//! ranked by days worked, with the selected row highlighted.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use clockin_core::formatting::format_month_long;
use clockin_core::models::{EmployeeMonth, YearMonth};

use crate::components::BadgeIndicator;
use crate::themes::Theme;

/// Message shown when a month has no clock-ins.
pub const NO_DATA_MESSAGE: &str = "No attendance data available for the selected month";

/// Display values for a single table row.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceRow {
    /// `"Ada Lovelace"`, or `"Unknown"` when both name parts are empty.
    pub name: String,
    pub employee_id: i64,
    pub email: String,
    pub days_worked: u32,
    pub average_clock_in: String,
}

impl AttendanceRow {
    pub fn from_employee(employee: &EmployeeMonth) -> Self {
        let name = employee.full_name();
        Self {
            name: if name.is_empty() {
                "Unknown".to_string()
            } else {
                name
            },
            employee_id: employee.employee_id,
            email: employee.email.clone(),
            days_worked: employee.days_worked,
            average_clock_in: employee.average_clock_in_time.clone(),
        }
    }
}

/// Build table rows for ranked employees, preserving order.
pub fn build_rows(employees: &[EmployeeMonth]) -> Vec<AttendanceRow> {
    employees.iter().map(AttendanceRow::from_employee).collect()
}

/// Render the attendance table into `area`.
///
/// `selected` indexes into `rows`; the table scrolls to keep it visible.
pub fn render_table_view(
    frame: &mut Frame,
    area: Rect,
    month: YearMonth,
    rows: &[AttendanceRow],
    selected: Option<usize>,
    theme: &Theme,
) {
    let header_cells = ["Employee", "ID", "Email", "Days", "Badge", "Avg Clock-in"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let data_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            Row::new(vec![
                Cell::from(row.name.clone()),
                Cell::from(format!("#{}", row.employee_id)),
                Cell::from(row.email.clone()),
                Cell::from(row.days_worked.to_string()),
                Cell::from(Line::from(
                    BadgeIndicator::for_days(row.days_worked, theme).to_span(),
                )),
                Cell::from(row.average_clock_in.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Min(24),
        Constraint::Length(6),
        Constraint::Length(10),
        Constraint::Length(13),
    ];

    let table = Table::new(data_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" Attendance · {} ", format_month_long(&month))),
        )
        .row_highlight_style(theme.table_selected)
        .style(theme.text);

    let mut state = TableState::default().with_selected(selected.filter(|i| *i < rows.len()));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Render the empty-month placeholder.
pub fn render_no_data(frame: &mut Frame, area: Rect, month: YearMonth, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NO_DATA_MESSAGE, theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Use ←/→ to switch months, 'q' or Ctrl+C to exit",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", format_month_long(&month))),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
