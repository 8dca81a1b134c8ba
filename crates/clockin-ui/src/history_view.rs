//! Per-employee detail panel.
//!
//! Shows the selected employee's totals and their clock-ins for the month,
//! newest first, each time coloured by punctuality tier.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use clockin_core::models::{EmployeeMonth, HistoryEntry};

use crate::components::{AttendanceBar, TierIndicator};
use crate::themes::Theme;

/// Shown when the employee has no clock-ins in the month.
pub const NO_RECORDS_MESSAGE: &str = "No clock-in records found";

/// Render the panel into `area`, clearing whatever is underneath.
pub fn render_history_view(
    frame: &mut Frame,
    area: Rect,
    employee: &EmployeeMonth,
    history: &[HistoryEntry],
    theme: &Theme,
) {
    let lines = build_history_lines(employee, history, theme);
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Clock-In History · Enter/Esc to close "),
        );
    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// Build the panel's lines (extracted for testability).
///
/// `history` is expected newest first; entries are numbered `Day N` counting
/// down from the total so the oldest clock-in is `Day 1`.
pub fn build_history_lines<'a>(
    employee: &'a EmployeeMonth,
    history: &'a [HistoryEntry],
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = Vec::with_capacity(history.len() + 10);

    // ── Identity ──────────────────────────────────────────────────────────────
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", employee.initials()), theme.header_accent),
        Span::styled(employee.full_name(), theme.bold),
        Span::styled(format!("  #{}", employee.employee_id), theme.dim),
    ]));
    lines.push(Line::from(Span::styled(employee.email.as_str(), theme.dim)));
    lines.push(Line::from(""));

    // ── Totals ────────────────────────────────────────────────────────────────
    lines.push(Line::from(vec![
        Span::styled("Total Days:    ", theme.label),
        Span::styled(employee.days_worked.to_string(), theme.value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Avg Clock-In:  ", theme.label),
        Span::styled(employee.average_clock_in_time.as_str(), theme.value),
    ]));
    lines.push(AttendanceBar::new(employee.days_worked, theme).to_line());
    lines.push(Line::from(""));

    // ── History ───────────────────────────────────────────────────────────────
    if history.is_empty() {
        lines.push(Line::from(Span::styled(NO_RECORDS_MESSAGE, theme.dim)));
        return lines;
    }

    let total = history.len();
    for (index, entry) in history.iter().enumerate() {
        let mut spans = vec![
            Span::styled(format!("Day {:<4}", total - index), theme.dim),
            Span::styled(format!("{:<20}", entry.date_label), theme.text),
        ];
        spans.extend(TierIndicator::new(&entry.time_label, entry.tier, theme).to_spans());
        lines.push(Line::from(spans));
    }

    lines
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clockin_core::punctuality::PunctualityTier;
    use ratatui::backend::TestBackend;
    use ratatui::style::Color;
    use ratatui::Terminal;

    fn ada() -> EmployeeMonth {
        EmployeeMonth {
            employee_id: 1,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            clock_in_times: vec!["9:00 AM".to_string(), "9:15 AM".to_string()],
            days_worked: 2,
            average_clock_in_time: "9:08 AM".to_string(),
        }
    }

    fn entry(day: u32, time: &str, tier: PunctualityTier) -> HistoryEntry {
        let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
        HistoryEntry {
            timestamp: date.and_hms_opt(9, 0, 0).unwrap(),
            date_label: format!("Mar {day}, 2024"),
            time_label: time.to_string(),
            tier,
        }
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_history_lines_numbering_counts_down() {
        let theme = Theme::dark();
        let employee = ada();
        let history = vec![
            entry(6, "9:15 AM", PunctualityTier::VeryLate),
            entry(5, "9:00 AM", PunctualityTier::VeryLate),
        ];
        let lines = build_history_lines(&employee, &history, &theme);
        let rendered: Vec<String> = lines.iter().map(text_of).collect();

        let day2 = rendered.iter().position(|l| l.starts_with("Day 2")).unwrap();
        let day1 = rendered.iter().position(|l| l.starts_with("Day 1")).unwrap();
        assert!(day2 < day1);
        assert!(rendered[day2].contains("Mar 6, 2024"));
        assert!(rendered[day2].contains("9:15 AM"));
    }

    #[test]
    fn test_history_lines_totals() {
        let theme = Theme::dark();
        let employee = ada();
        let lines = build_history_lines(&employee, &[], &theme);
        let rendered: Vec<String> = lines.iter().map(text_of).collect();

        assert!(rendered[0].contains("[AL] Ada Lovelace"));
        assert!(rendered.iter().any(|l| l == "Total Days:    2"));
        assert!(rendered.iter().any(|l| l == "Avg Clock-In:  9:08 AM"));
        assert_eq!(rendered.last().unwrap(), NO_RECORDS_MESSAGE);
    }

    #[test]
    fn test_history_times_coloured_by_tier() {
        let theme = Theme::dark();
        let employee = ada();
        let history = vec![entry(5, "7:55 AM", PunctualityTier::OnTime)];
        let lines = build_history_lines(&employee, &history, &theme);
        let last = lines.last().unwrap();
        let time_span = last.spans.last().unwrap();
        assert_eq!(time_span.content, "7:55 AM");
        assert_eq!(time_span.style.fg, Some(Color::Green));
    }

    #[test]
    fn test_render_history_view_does_not_panic() {
        let backend = TestBackend::new(70, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let employee = ada();
        let history = vec![entry(5, "9:00 AM", PunctualityTier::Late)];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_history_view(frame, area, &employee, &history, &theme);
            })
            .unwrap();
    }
}
