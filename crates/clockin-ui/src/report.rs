//! Print-friendly plain-text report.
//!
//! Produces the month's table followed by one block per employee with their
//! clock-ins oldest first. Column widths are measured in terminal cells so
//! non-ASCII names stay aligned.

use unicode_width::UnicodeWidthStr;

use clockin_core::formatting::{format_date_long, format_month_long, format_one_decimal};
use clockin_core::models::{AttendanceBadge, AttendanceEvent};
use clockin_core::punctuality::PunctualityPolicy;
use clockin_data::aggregator::{AttendanceAggregator, HistoryOrder, HistoryStyle};
use clockin_data::analysis::MonthlyReport;

use crate::table_view::{build_rows, NO_DATA_MESSAGE};

pub const REPORT_TITLE: &str = "Employee Attendance Report";
pub const REPORT_FOOTER: &str =
    "This report was automatically generated by the Clock-In Analysis System";

const COLUMN_GAP: &str = "  ";

/// Render `report` as plain text. `events` supplies the per-employee history.
pub fn render_text_report(
    report: &MonthlyReport,
    events: &[AttendanceEvent],
    policy: &PunctualityPolicy,
) -> String {
    let mut out = String::new();

    // ── Title block ───────────────────────────────────────────────────────────
    push_line(&mut out, REPORT_TITLE);
    push_line(&mut out, &"=".repeat(REPORT_TITLE.width()));
    push_line(
        &mut out,
        &format!("Period: {}", format_month_long(&report.month)),
    );
    push_line(
        &mut out,
        &format!(
            "Generated: {}",
            format_date_long(&report.metadata.generated_on)
        ),
    );
    push_line(&mut out, "");

    if report.is_empty() {
        push_line(&mut out, NO_DATA_MESSAGE);
        push_footer(&mut out);
        return out;
    }

    // ── Table ─────────────────────────────────────────────────────────────────
    let header = ["Employee", "Email", "Days", "Badge", "Avg Clock-In"];
    let body: Vec<[String; 5]> = build_rows(&report.employees)
        .into_iter()
        .map(|row| {
            [
                format!("{} (#{})", row.name, row.employee_id),
                row.email,
                row.days_worked.to_string(),
                AttendanceBadge::for_days(row.days_worked).label().to_string(),
                row.average_clock_in,
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.width());
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    push_line(&mut out, &table_line(&header, &widths));
    let rule_width = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);
    push_line(&mut out, &"-".repeat(rule_width));
    for row in &body {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_line(&mut out, &table_line(&cells, &widths));
    }
    push_line(&mut out, "");

    let overview = &report.overview;
    push_line(
        &mut out,
        &format!(
            "Employees: {} | Clock-ins: {} | Avg days: {} | Perfect: {}",
            overview.total_employees,
            overview.total_clock_ins,
            format_one_decimal(overview.average_days_worked),
            overview.perfect_attendance,
        ),
    );

    // ── Per-employee blocks ───────────────────────────────────────────────────
    for employee in &report.employees {
        push_line(&mut out, "");
        let name = employee.full_name();
        let total = format!("Total Days: {}", employee.days_worked);
        let gap = rule_width
            .saturating_sub(name.width() + total.width())
            .max(COLUMN_GAP.len());
        push_line(&mut out, &format!("{name}{}{total}", " ".repeat(gap)));
        push_line(&mut out, &employee.email);
        push_line(&mut out, "Attendance History:");

        let history = AttendanceAggregator::employee_history(
            events,
            employee.employee_id,
            report.month,
            HistoryOrder::Ascending,
            HistoryStyle::Compact,
            policy,
        );
        let date_width = history
            .iter()
            .map(|h| h.date_label.width())
            .max()
            .unwrap_or(0);
        for entry in &history {
            push_line(
                &mut out,
                &format!(
                    "  {}{COLUMN_GAP}{}",
                    pad(&entry.date_label, date_width),
                    entry.time_label
                ),
            );
        }
    }

    push_line(&mut out, "");
    push_footer(&mut out);
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_footer(out: &mut String) {
    push_line(out, &"-".repeat(REPORT_FOOTER.width()));
    push_line(out, REPORT_FOOTER);
}

/// Left-align `cell` in `width` terminal columns.
fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

fn table_line(cells: &[&str], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    padded.join(COLUMN_GAP).trim_end().to_string()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
