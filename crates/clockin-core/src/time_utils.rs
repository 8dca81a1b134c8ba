//! Timezone resolution and timestamp parsing.
//!
//! [`TimestampParser`] turns `created_at` values into wall-clock times in the
//! configured zone. The `clock_*` helpers read the `H:MM AM/PM` labels back.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use regex::Regex;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve `"auto"` (any case) to the system timezone; other names pass
/// through unchanged.
pub fn resolve_timezone_name(name: &str) -> String {
    if name.eq_ignore_ascii_case("auto") {
        get_system_timezone()
    } else {
        name.to_string()
    }
}

/// Validate that `tz_name` is a recognised IANA timezone identifier.
pub fn validate_timezone(tz_name: &str) -> bool {
    tz_name.parse::<Tz>().is_ok()
}

// ── TimestampParser ───────────────────────────────────────────────────────────

/// Naive patterns, interpreted as local wall-clock time.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Date-only patterns; the time is taken as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Patterns with an explicit offset that RFC 3339 parsing rejects,
/// e.g. the `+00` suffix some database exports emit.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%#z"];

/// Turns `created_at` strings into local wall-clock timestamps.
///
/// Timestamps with an offset are converted into the configured zone;
/// timestamps without one are already local and are kept as written.
#[derive(Debug, Clone)]
pub struct TimestampParser {
    local_tz: Tz,
}

impl TimestampParser {
    /// Create a parser for the given IANA zone name (`"auto"` detects the
    /// system zone). Unknown names fall back to UTC with a warning.
    pub fn new(tz_name: &str) -> Self {
        let resolved = resolve_timezone_name(tz_name);
        let tz = resolved.parse::<Tz>().unwrap_or_else(|_| {
            warn!(
                "TimestampParser: unrecognised timezone \"{}\", falling back to UTC",
                resolved
            );
            Tz::UTC
        });
        Self { local_tz: tz }
    }

    /// Parser that treats offset timestamps as UTC wall-clock time.
    pub fn utc() -> Self {
        Self { local_tz: Tz::UTC }
    }

    pub fn local_tz(&self) -> Tz {
        self.local_tz
    }

    /// Parse a timestamp string, returning `None` for empty or unrecognised
    /// input.
    pub fn parse(&self, s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let normalised = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
            Some(stripped) => format!("{}+00:00", stripped),
            None => s.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
            return Some(dt.with_timezone(&self.local_tz).naive_local());
        }
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&normalised, fmt) {
                return Some(dt.with_timezone(&self.local_tz).naive_local());
            }
        }

        for fmt in DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive);
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return date.and_hms_opt(0, 0, 0);
            }
        }

        None
    }
}

impl Default for TimestampParser {
    fn default() -> Self {
        Self::utc()
    }
}

// ── 12-hour clock strings ─────────────────────────────────────────────────────

fn clock_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d{1,2}):(\d{2})(?::(\d{2}))?\s*([AaPp][Mm])\s*$").expect("regex is valid")
    })
}

/// Convert an `H:MM AM/PM` (optionally `H:MM:SS AM/PM`) string into minutes
/// since midnight. Seconds are ignored.
///
/// `12:xx AM` maps to `0..60`, `12:xx PM` to `720..780`.
pub fn clock_to_minutes(s: &str) -> Option<u32> {
    let caps = clock_regex().captures(s)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour > 12 || minute > 59 {
        return None;
    }
    let pm = caps[4].eq_ignore_ascii_case("pm");
    let mut total = (hour % 12) * 60 + minute;
    if pm {
        total += 12 * 60;
    }
    Some(total)
}

/// `true` when the clock string carries a `PM` suffix.
pub fn is_pm(s: &str) -> Option<bool> {
    clock_regex()
        .captures(s)
        .map(|caps| caps[4].eq_ignore_ascii_case("pm"))
}

/// The hour exactly as written in a clock string (`1..=12`).
pub fn clock_hour(s: &str) -> Option<u32> {
    clock_regex().captures(s)?[1].parse().ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
