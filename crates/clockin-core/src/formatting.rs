//! Display formatting for clock times, dates and months.
//!
//! All clock output uses the 12-hour `H:MM AM/PM` form without a leading
//! zero on the hour.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::YearMonth;

/// Render the time-of-day of `dt` as `H:MM AM/PM`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use clockin_core::formatting::format_clock_time;
///
/// let dt = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(9, 5, 0).unwrap();
/// assert_eq!(format_clock_time(&dt), "9:05 AM");
/// ```
pub fn format_clock_time(dt: &NaiveDateTime) -> String {
    dt.format("%-I:%M %p").to_string()
}

/// Render the time-of-day of `dt` as `H:MM:SS AM/PM`.
pub fn format_clock_time_with_seconds(dt: &NaiveDateTime) -> String {
    dt.format("%-I:%M:%S %p").to_string()
}

/// Render minutes since midnight as `H:MM AM/PM`.
///
/// Values of a day or more wrap around midnight.
///
/// # Examples
///
/// ```
/// use clockin_core::formatting::format_minutes_as_clock;
///
/// assert_eq!(format_minutes_as_clock(548), "9:08 AM");
/// assert_eq!(format_minutes_as_clock(0), "12:00 AM");
/// assert_eq!(format_minutes_as_clock(750), "12:30 PM");
/// ```
pub fn format_minutes_as_clock(minutes: u32) -> String {
    let minutes = minutes % (24 * 60);
    let hours = minutes / 60;
    let mins = minutes % 60;
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display_hours = match hours {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hours, mins, period)
}

/// `"March 2024"`.
pub fn format_month_long(month: &YearMonth) -> String {
    match month.first_day() {
        Some(day) => day.format("%B %Y").to_string(),
        None => month.to_string(),
    }
}

/// `"Mar 5, 2024"`.
pub fn format_date_short(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `"Tue, Mar 5, 2024"`.
pub fn format_date_with_weekday(date: &NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

/// `"March 5, 2024"`.
pub fn format_date_long(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// One decimal place, as used for average days worked.
pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    // ── format_clock_time ────────────────────────────────────────────────────

    #[test]
    fn test_format_clock_time_no_leading_zero() {
        assert_eq!(format_clock_time(&at(9, 0, 0)), "9:00 AM");
        assert_eq!(format_clock_time(&at(8, 7, 0)), "8:07 AM");
    }

    #[test]
    fn test_format_clock_time_noon_and_midnight() {
        assert_eq!(format_clock_time(&at(0, 15, 0)), "12:15 AM");
        assert_eq!(format_clock_time(&at(12, 0, 0)), "12:00 PM");
    }

    #[test]
    fn test_format_clock_time_evening() {
        assert_eq!(format_clock_time(&at(18, 30, 0)), "6:30 PM");
        assert_eq!(format_clock_time(&at(23, 59, 59)), "11:59 PM");
    }

    #[test]
    fn test_format_clock_time_with_seconds() {
        assert_eq!(format_clock_time_with_seconds(&at(9, 5, 7)), "9:05:07 AM");
    }

    // ── format_minutes_as_clock ──────────────────────────────────────────────

    #[test]
    fn test_format_minutes_as_clock() {
        assert_eq!(format_minutes_as_clock(480), "8:00 AM");
        assert_eq!(format_minutes_as_clock(720), "12:00 PM");
        assert_eq!(format_minutes_as_clock(779), "12:59 PM");
        assert_eq!(format_minutes_as_clock(780), "1:00 PM");
        assert_eq!(format_minutes_as_clock(1439), "11:59 PM");
    }

    #[test]
    fn test_format_minutes_as_clock_wraps() {
        assert_eq!(format_minutes_as_clock(1440), "12:00 AM");
    }

    // ── dates ────────────────────────────────────────────────────────────────

    #[test]
    fn test_format_month_long() {
        let ym = YearMonth::new(2024, 3).unwrap();
        assert_eq!(format_month_long(&ym), "March 2024");
    }

    #[test]
    fn test_format_dates() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date_short(&d), "Mar 5, 2024");
        assert_eq!(format_date_with_weekday(&d), "Tue, Mar 5, 2024");
        assert_eq!(format_date_long(&d), "March 5, 2024");
    }

    #[test]
    fn test_format_one_decimal() {
        assert_eq!(format_one_decimal(0.0), "0.0");
        assert_eq!(format_one_decimal(1.5), "1.5");
        assert_eq!(format_one_decimal(2.0 / 3.0), "0.7");
    }
}
