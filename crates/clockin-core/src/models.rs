use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ClockInError;
use crate::punctuality::PunctualityTier;

/// A single clock-in decoded from one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Canonical employee identifier (`user_id`, then `user_ref`, then `id`).
    pub employee_id: i64,
    /// Raw `id` column; may identify the event row rather than the employee.
    #[serde(default)]
    pub event_id: i64,
    /// `None` when the export held a literal `NULL`.
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Local wall-clock time of the clock-in.
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub role: i64,
    #[serde(default)]
    pub otp: i64,
    /// Kept verbatim, including a literal `NULL`.
    #[serde(default)]
    pub phone: Option<String>,
    /// Columns with no dedicated field, keyed by header name.
    #[serde(default)]
    pub extra: BTreeMap<String, Option<String>>,
}

impl AttendanceEvent {
    /// Calendar month the event falls in.
    pub fn month(&self) -> YearMonth {
        YearMonth::from_datetime(&self.created_at)
    }

    pub fn first_name_or_empty(&self) -> &str {
        self.first_name.as_deref().unwrap_or("")
    }

    pub fn last_name_or_empty(&self) -> &str {
        self.last_name.as_deref().unwrap_or("")
    }

    pub fn email_or_empty(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}

/// Attendance statistics for one employee within one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMonth {
    pub employee_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// `H:MM AM/PM` strings in the order the events were encountered.
    pub clock_in_times: Vec<String>,
    /// One per qualifying event; repeated clock-ins on a date all count.
    pub days_worked: u32,
    /// Mean clock-in time rendered as `H:MM AM/PM`.
    pub average_clock_in_time: String,
}

impl EmployeeMonth {
    /// `"First Last"`, trimmed when either part is empty.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Up to two initials for avatar-style display.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .collect()
    }
}

// ── YearMonth ─────────────────────────────────────────────────────────────────

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Build a month, returning `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }

    /// `true` when `dt` lies in this month; day and time are ignored.
    pub fn contains(&self, dt: &NaiveDateTime) -> bool {
        dt.year() == self.year && dt.month() == self.month
    }

    /// First day of the month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ClockInError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ClockInError::InvalidMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

// ── History / overview ────────────────────────────────────────────────────────

/// One clock-in as shown in an employee's history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub timestamp: NaiveDateTime,
    pub date_label: String,
    pub time_label: String,
    pub tier: PunctualityTier,
}

/// Headline numbers for the selected month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthOverview {
    pub total_employees: usize,
    pub total_clock_ins: u32,
    /// `0.0` when there are no employees.
    pub average_days_worked: f64,
    /// Employees with at least [`AttendanceBadge::EXCELLENT_DAYS`] days.
    pub perfect_attendance: usize,
}

/// Coarse rating of an employee's month by days worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttendanceBadge {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl AttendanceBadge {
    pub const EXCELLENT_DAYS: u32 = 20;
    pub const GOOD_DAYS: u32 = 15;
    pub const FAIR_DAYS: u32 = 10;

    pub fn for_days(days: u32) -> Self {
        if days >= Self::EXCELLENT_DAYS {
            AttendanceBadge::Excellent
        } else if days >= Self::GOOD_DAYS {
            AttendanceBadge::Good
        } else if days >= Self::FAIR_DAYS {
            AttendanceBadge::Fair
        } else {
            AttendanceBadge::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceBadge::Excellent => "Excellent",
            AttendanceBadge::Good => "Good",
            AttendanceBadge::Fair => "Fair",
            AttendanceBadge::Poor => "Poor",
        }
    }
}

impl fmt::Display for AttendanceBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
