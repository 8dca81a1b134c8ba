//! Monthly report pipeline and its per-month cache.
//!
//! [`build_report`] runs aggregation and overview for one month.
//! [`ReportCache`] owns a decoded event set and memoises reports by month so
//! the viewer can flip between months without recomputing.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clockin_core::models::{AttendanceEvent, EmployeeMonth, MonthOverview, YearMonth};
use tracing::debug;

use crate::aggregator::AttendanceAggregator;
use crate::observer::PipelineObserver;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside a monthly report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportMetadata {
    /// Local date the report was generated on.
    pub generated_on: NaiveDate,
    /// Events in the whole loaded file.
    pub events_total: usize,
    /// Events that fell inside the report month.
    pub events_in_month: u32,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// Everything the presentation layer needs for one month.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MonthlyReport {
    pub month: YearMonth,
    /// Ranked by days worked, descending.
    pub employees: Vec<EmployeeMonth>,
    pub overview: MonthOverview,
    pub metadata: ReportMetadata,
}

impl MonthlyReport {
    /// `true` when no employee clocked in during the month.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Aggregate `events` for `month` and derive the overview.
pub fn build_report(
    events: &[AttendanceEvent],
    month: YearMonth,
    observer: &dyn PipelineObserver,
) -> MonthlyReport {
    let start = Instant::now();
    let employees = AttendanceAggregator::aggregate(events, month, observer);
    let overview = AttendanceAggregator::month_overview(&employees);
    let aggregate_time = start.elapsed().as_secs_f64();

    let metadata = ReportMetadata {
        generated_on: Local::now().date_naive(),
        events_total: events.len(),
        events_in_month: overview.total_clock_ins,
        aggregate_time_seconds: aggregate_time,
    };

    MonthlyReport {
        month,
        employees,
        overview,
        metadata,
    }
}

// ── ReportCache ───────────────────────────────────────────────────────────────

/// Decoded events plus memoised reports keyed by month.
///
/// The events never change for the lifetime of the cache, so the month
/// alone identifies a report.
///
/// # Example
/// ```
/// use clockin_data::analysis::ReportCache;
///
/// let cache = ReportCache::new(Vec::new());
/// assert!(cache.default_month().is_none());
/// assert!(cache.available_months().is_empty());
/// ```
pub struct ReportCache {
    events: Vec<AttendanceEvent>,
    months: Vec<YearMonth>,
    reports: HashMap<YearMonth, MonthlyReport>,
}

impl ReportCache {
    pub fn new(events: Vec<AttendanceEvent>) -> Self {
        let months = AttendanceAggregator::available_months(&events);
        Self {
            events,
            months,
            reports: HashMap::new(),
        }
    }

    pub fn events(&self) -> &[AttendanceEvent] {
        &self.events
    }

    /// Months present in the events, most recent first.
    pub fn available_months(&self) -> &[YearMonth] {
        &self.months
    }

    /// Month of the most recent clock-in.
    pub fn default_month(&self) -> Option<YearMonth> {
        AttendanceAggregator::default_month(&self.events)
    }

    /// Report for `month`, computed on first request.
    pub fn report(&mut self, month: YearMonth, observer: &dyn PipelineObserver) -> &MonthlyReport {
        let events = &self.events;
        self.reports.entry(month).or_insert_with(|| {
            debug!(%month, "building monthly report");
            build_report(events, month, observer)
        })
    }

    /// Previously computed report for `month`, without computing it.
    pub fn get(&self, month: YearMonth) -> Option<&MonthlyReport> {
        self.reports.get(&month)
    }

    pub fn is_cached(&self, month: YearMonth) -> bool {
        self.reports.contains_key(&month)
    }

    /// Drop every memoised report.
    pub fn invalidate(&mut self) {
        self.reports.clear();
        debug!("report cache invalidated");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::testing::RecordingObserver;
    use crate::observer::NoopObserver;
    use crate::reader::decode_events;
    use clockin_core::time_utils::TimestampParser;

    const CSV: &str = "\
id,user_id,first_name,last_name,email,created_at
1,1,Ada,Lovelace,ada@example.com,2024-03-05 09:00:00
2,1,Ada,Lovelace,ada@example.com,2024-03-06 09:15:00
3,2,Grace,Hopper,grace@example.com,2024-03-05 08:00:00
4,2,Grace,Hopper,grace@example.com,2024-02-20 08:00:00
";

    fn events() -> Vec<AttendanceEvent> {
        decode_events(CSV, &TimestampParser::utc(), &NoopObserver).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_build_report_end_to_end() {
        let report = build_report(&events(), ym(2024, 3), &NoopObserver);
        assert_eq!(report.month, ym(2024, 3));
        assert_eq!(report.employees.len(), 2);
        assert_eq!(report.employees[0].full_name(), "Ada Lovelace");
        assert_eq!(report.employees[0].average_clock_in_time, "9:08 AM");
        assert_eq!(report.overview.total_clock_ins, 3);
        assert_eq!(report.metadata.events_total, 4);
        assert_eq!(report.metadata.events_in_month, 3);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_build_report_empty_month() {
        let report = build_report(&events(), ym(2023, 1), &NoopObserver);
        assert!(report.is_empty());
        assert_eq!(report.overview.total_employees, 0);
    }

    #[test]
    fn test_cache_months() {
        let cache = ReportCache::new(events());
        assert_eq!(cache.available_months(), &[ym(2024, 3), ym(2024, 2)]);
        assert_eq!(cache.default_month(), Some(ym(2024, 3)));
        assert_eq!(cache.events().len(), 4);
    }

    #[test]
    fn test_cache_memoises_by_month() {
        let mut cache = ReportCache::new(events());
        let observer = RecordingObserver::default();

        assert!(!cache.is_cached(ym(2024, 3)));
        assert!(cache.get(ym(2024, 3)).is_none());
        let first = cache.report(ym(2024, 3), &observer).clone();
        assert!(cache.is_cached(ym(2024, 3)));
        let second = cache.report(ym(2024, 3), &observer).clone();

        assert_eq!(first.employees, second.employees);
        assert_eq!(cache.get(ym(2024, 3)).unwrap().employees, first.employees);
        // Aggregation ran once.
        assert_eq!(observer.filtered.borrow().len(), 1);

        cache.report(ym(2024, 2), &observer);
        assert_eq!(observer.filtered.borrow().len(), 2);
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = ReportCache::new(events());
        cache.report(ym(2024, 3), &NoopObserver);
        cache.invalidate();
        assert!(!cache.is_cached(ym(2024, 3)));
    }
}
