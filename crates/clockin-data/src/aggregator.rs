//! Per-employee attendance aggregation over calendar months.

use std::collections::{BTreeSet, HashMap};

use clockin_core::formatting::{
    format_clock_time, format_clock_time_with_seconds, format_date_short,
    format_date_with_weekday, format_minutes_as_clock,
};
use clockin_core::models::{
    AttendanceBadge, AttendanceEvent, EmployeeMonth, HistoryEntry, MonthOverview, YearMonth,
};
use clockin_core::punctuality::{classify, PunctualityPolicy};
use clockin_core::time_utils::clock_to_minutes;

use crate::observer::PipelineObserver;

// ── History options ───────────────────────────────────────────────────────────

/// Chronological direction of a history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOrder {
    /// Oldest first, as in the printed report.
    Ascending,
    /// Newest first, as in the detail panel.
    Descending,
}

/// Label style of a history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryStyle {
    /// `Mar 5, 2024` / `9:00 AM`.
    Compact,
    /// `Tue, Mar 5, 2024` / `9:00:00 AM`.
    Detailed,
}

// ── AttendanceAggregator ──────────────────────────────────────────────────────

/// Stateless helper that turns attendance events into monthly statistics.
pub struct AttendanceAggregator;

impl AttendanceAggregator {
    /// Build one [`EmployeeMonth`] per employee with events in `month`.
    ///
    /// The first event seen for an employee supplies their name and email;
    /// later events only add a clock-in time, even if their names differ.
    /// The result is ranked by `days_worked` descending, ties keeping
    /// encounter order. A month without events yields an empty vector.
    pub fn aggregate(
        events: &[AttendanceEvent],
        month: YearMonth,
        observer: &dyn PipelineObserver,
    ) -> Vec<EmployeeMonth> {
        let in_month: Vec<&AttendanceEvent> = events
            .iter()
            .filter(|e| month.contains(&e.created_at))
            .collect();
        observer.on_month_filtered(month, in_month.len(), events.len());

        let mut employees: Vec<EmployeeMonth> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();

        for event in in_month {
            let slot = *index.entry(event.employee_id).or_insert_with(|| {
                employees.push(EmployeeMonth {
                    employee_id: event.employee_id,
                    first_name: event.first_name_or_empty().to_string(),
                    last_name: event.last_name_or_empty().to_string(),
                    email: event.email_or_empty().to_string(),
                    clock_in_times: Vec::new(),
                    days_worked: 0,
                    average_clock_in_time: String::new(),
                });
                employees.len() - 1
            });
            employees[slot]
                .clock_in_times
                .push(format_clock_time(&event.created_at));
        }
        observer.on_grouped(month, employees.len());

        for employee in &mut employees {
            employee.days_worked = employee.clock_in_times.len() as u32;
            employee.average_clock_in_time =
                average_clock_time(&employee.clock_in_times).unwrap_or_default();
        }

        // `sort_by` is stable, so equal counts keep encounter order.
        employees.sort_by(|a, b| b.days_worked.cmp(&a.days_worked));
        employees
    }

    /// Distinct months present in `events`, most recent first.
    pub fn available_months(events: &[AttendanceEvent]) -> Vec<YearMonth> {
        let months: BTreeSet<YearMonth> = events.iter().map(AttendanceEvent::month).collect();
        months.into_iter().rev().collect()
    }

    /// Month containing the latest `created_at`, or `None` without events.
    pub fn default_month(events: &[AttendanceEvent]) -> Option<YearMonth> {
        events
            .iter()
            .map(|e| e.created_at)
            .max()
            .map(|latest| YearMonth::from_datetime(&latest))
    }

    /// Clock-ins of one employee within `month`, sorted by timestamp.
    ///
    /// Each entry carries the punctuality tier of its `H:MM AM/PM` time.
    pub fn employee_history(
        events: &[AttendanceEvent],
        employee_id: i64,
        month: YearMonth,
        order: HistoryOrder,
        style: HistoryStyle,
        policy: &PunctualityPolicy,
    ) -> Vec<HistoryEntry> {
        let mut entries: Vec<HistoryEntry> = events
            .iter()
            .filter(|e| e.employee_id == employee_id && month.contains(&e.created_at))
            .map(|e| {
                let date = e.created_at.date();
                let clock = format_clock_time(&e.created_at);
                let (date_label, time_label) = match style {
                    HistoryStyle::Compact => (format_date_short(&date), clock.clone()),
                    HistoryStyle::Detailed => (
                        format_date_with_weekday(&date),
                        format_clock_time_with_seconds(&e.created_at),
                    ),
                };
                HistoryEntry {
                    timestamp: e.created_at,
                    date_label,
                    time_label,
                    tier: classify(employee_id, &clock, policy),
                }
            })
            .collect();

        match order {
            HistoryOrder::Ascending => entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            HistoryOrder::Descending => entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }
        entries
    }

    /// Headline numbers for an aggregated month.
    pub fn month_overview(employees: &[EmployeeMonth]) -> MonthOverview {
        let total_employees = employees.len();
        let total_clock_ins: u32 = employees.iter().map(|e| e.days_worked).sum();
        let average_days_worked = if total_employees > 0 {
            f64::from(total_clock_ins) / total_employees as f64
        } else {
            0.0
        };
        let perfect_attendance = employees
            .iter()
            .filter(|e| e.days_worked >= AttendanceBadge::EXCELLENT_DAYS)
            .count();

        MonthOverview {
            total_employees,
            total_clock_ins,
            average_days_worked,
            perfect_attendance,
        }
    }
}

/// Mean of `H:MM AM/PM` strings, rounded to the nearest minute.
///
/// Strings that are not clock times are skipped; `None` when nothing
/// remains.
pub fn average_clock_time(times: &[String]) -> Option<String> {
    let minutes: Vec<u32> = times.iter().filter_map(|t| clock_to_minutes(t)).collect();
    if minutes.is_empty() {
        return None;
    }
    let total: u64 = minutes.iter().map(|&m| u64::from(m)).sum();
    let mean = total as f64 / minutes.len() as f64;
    Some(format_minutes_as_clock(mean.round() as u32))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
