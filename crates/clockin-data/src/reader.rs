//! CSV decoding for clock-in exports.
//!
//! Turns the raw text of an export such as `user_locations.csv` into
//! [`AttendanceEvent`] values. The format is loose: a header row, comma
//! separated fields, and double quotes that shield commas.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use clockin_core::error::{ClockInError, Result};
use clockin_core::models::AttendanceEvent;
use clockin_core::time_utils::TimestampParser;
use tracing::debug;

use crate::observer::PipelineObserver;

/// Literal the exports use for database nulls.
const NULL_LITERAL: &str = "NULL";

/// Spreadsheet exports often prefix the file with a UTF-8 BOM.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Headers decoded into dedicated fields; anything else lands in `extra`.
const KNOWN_HEADERS: &[&str] = &[
    "id",
    "user_id",
    "user_ref",
    "first_name",
    "last_name",
    "email",
    "created_at",
    "latitude",
    "longitude",
    "role",
    "otp",
    "phone",
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Decode CSV text into one event per non-blank data row. A leading UTF-8
/// byte order mark is ignored.
///
/// Fails with [`ClockInError::EmptyInput`] for blank input,
/// [`ClockInError::NoDataRows`] when only a header is present, and
/// [`ClockInError::InvalidTimestamp`] when a `created_at` cannot be parsed.
pub fn decode_events(
    raw: &str,
    parser: &TimestampParser,
    observer: &dyn PipelineObserver,
) -> Result<Vec<AttendanceEvent>> {
    let raw = raw.strip_prefix(BYTE_ORDER_MARK).unwrap_or(raw);
    let mut lines = raw
        .split('\n')
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header_line) = lines.next().ok_or(ClockInError::EmptyInput)?;
    let headers = split_csv_line(header_line);
    observer.on_headers(&headers);

    let mut events = Vec::new();
    for (line_no, line) in lines {
        let fields = split_csv_line(line);
        let event = decode_row(&headers, &fields, line_no, parser)?;
        observer.on_row_decoded(line_no, &event);
        events.push(event);
    }

    if events.is_empty() {
        return Err(ClockInError::NoDataRows);
    }

    observer.on_decoded(events.len());
    Ok(events)
}

/// Read `path` and decode its contents with [`decode_events`].
pub fn load_csv_file(
    path: &Path,
    parser: &TimestampParser,
    observer: &dyn PipelineObserver,
) -> Result<Vec<AttendanceEvent>> {
    let text = std::fs::read_to_string(path).map_err(|source| ClockInError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("File {} loaded, {} bytes", path.display(), text.len());

    let events = decode_events(&text, parser, observer)?;
    debug!("Decoded {} events from {}", events.len(), path.display());
    Ok(events)
}

/// Split one CSV line into trimmed fields.
///
/// A `"` toggles quoted mode and is dropped from the output; commas inside
/// quotes are kept literally.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

// ── Row decoding ──────────────────────────────────────────────────────────────

/// Header → value view of one row. A repeated header keeps its last value.
struct Row<'a> {
    values: HashMap<&'a str, &'a str>,
}

impl<'a> Row<'a> {
    fn new(headers: &'a [String], fields: &'a [String]) -> Self {
        let values = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = fields.get(idx).map(String::as_str).unwrap_or("");
                (header.as_str(), value)
            })
            .collect();
        Self { values }
    }

    fn get(&self, header: &str) -> Option<&'a str> {
        self.values.get(header).copied()
    }

    fn integer(&self, header: &str) -> i64 {
        self.get(header).map(parse_lenient_int).unwrap_or(0)
    }

    fn float(&self, header: &str) -> f64 {
        self.get(header).map(parse_lenient_float).unwrap_or(0.0)
    }

    /// Missing column → `Some("")`, `NULL` → `None`.
    fn text(&self, header: &str) -> Option<String> {
        match self.get(header) {
            None => Some(String::new()),
            Some(value) => nullable(value),
        }
    }
}

fn decode_row(
    headers: &[String],
    fields: &[String],
    line: usize,
    parser: &TimestampParser,
) -> Result<AttendanceEvent> {
    let row = Row::new(headers, fields);

    let event_id = row.integer("id");
    let user_id = row.integer("user_id");
    let user_ref = row.integer("user_ref");
    let employee_id = [user_id, user_ref]
        .into_iter()
        .find(|id| *id != 0)
        .unwrap_or(event_id);

    let raw_created = row.get("created_at").unwrap_or("");
    let created_at = parser
        .parse(raw_created)
        .ok_or_else(|| ClockInError::InvalidTimestamp {
            line,
            value: raw_created.to_string(),
        })?;

    let extra: BTreeMap<String, Option<String>> = row
        .values
        .iter()
        .filter(|(header, _)| !KNOWN_HEADERS.contains(*header))
        .map(|(header, value)| (header.to_string(), nullable(value)))
        .collect();

    Ok(AttendanceEvent {
        employee_id,
        event_id,
        first_name: row.text("first_name"),
        last_name: row.text("last_name"),
        email: row.text("email"),
        created_at,
        latitude: row.float("latitude"),
        longitude: row.float("longitude"),
        role: row.integer("role"),
        otp: row.integer("otp"),
        phone: row.get("phone").map(str::to_string),
        extra,
    })
}

fn nullable(value: &str) -> Option<String> {
    if value == NULL_LITERAL {
        None
    } else {
        Some(value.to_string())
    }
}

// ── Lenient numeric parsing ───────────────────────────────────────────────────

/// Parse the leading integer of `s` (`"42abc"` → 42). `NULL`, empty or
/// non-numeric input yields 0.
fn parse_lenient_int(s: &str) -> i64 {
    let s = s.trim();
    if s == NULL_LITERAL {
        return 0;
    }
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }
    s[..end].parse().unwrap_or(0)
}

/// Parse the leading decimal number of `s` (`"51.5N"` → 51.5). `NULL`,
/// empty or non-numeric input yields 0.0.
fn parse_lenient_float(s: &str) -> f64 {
    let s = s.trim();
    if s == NULL_LITERAL {
        return 0.0;
    }
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let mut saw_digit = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        saw_digit = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::testing::RecordingObserver;
    use crate::observer::NoopObserver;
    use chrono::NaiveDateTime;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn decode(raw: &str) -> Result<Vec<AttendanceEvent>> {
        decode_events(raw, &TimestampParser::utc(), &NoopObserver)
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    const SAMPLE: &str = "\
id,user_id,first_name,last_name,email,created_at,latitude,longitude
1,10,Ada,Lovelace,ada@example.com,2024-03-05 09:00:00,51.5,-0.12
2,10,Ada,Lovelace,ada@example.com,2024-03-06 09:15:00,51.5,-0.12
3,20,Grace,Hopper,grace@example.com,2024-03-05 08:00:00,NULL,NULL
";

    // ── split_csv_line ────────────────────────────────────────────────────────

    #[test]
    fn test_split_plain_fields() {
        assert_eq!(split_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_trims_fields() {
        assert_eq!(split_csv_line(" a , b ,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_comma_is_literal() {
        assert_eq!(
            split_csv_line(r#"1,"Doe, Jane",x"#),
            vec!["1", "Doe, Jane", "x"]
        );
    }

    #[test]
    fn test_split_quotes_never_emitted() {
        assert_eq!(split_csv_line(r#""a"b"c""#), vec!["abc"]);
    }

    #[test]
    fn test_split_empty_fields() {
        assert_eq!(split_csv_line(",,"), vec!["", "", ""]);
    }

    // ── decode_events ─────────────────────────────────────────────────────────

    #[test]
    fn test_decode_one_event_per_row() {
        let events = decode(SAMPLE).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].first_name.as_deref(), Some("Ada"));
        assert_eq!(events[0].created_at, ts("2024-03-05 09:00:00"));
        assert!((events[0].latitude - 51.5).abs() < 1e-9);
        assert!((events[0].longitude + 0.12).abs() < 1e-9);
    }

    #[test]
    fn test_decode_user_id_preferred_over_id() {
        let events = decode(SAMPLE).unwrap();
        assert_eq!(events[0].employee_id, 10);
        assert_eq!(events[0].event_id, 1);
        assert_eq!(events[2].employee_id, 20);
    }

    #[test]
    fn test_decode_user_ref_used_when_user_id_missing() {
        let raw = "id,user_ref,created_at\n7,33,2024-03-05 09:00:00\n";
        let events = decode(raw).unwrap();
        assert_eq!(events[0].employee_id, 33);
    }

    #[test]
    fn test_decode_falls_back_to_id() {
        let raw = "id,user_id,created_at\n7,NULL,2024-03-05 09:00:00\n";
        let events = decode(raw).unwrap();
        assert_eq!(events[0].employee_id, 7);
    }

    #[test]
    fn test_decode_null_normalisation() {
        let raw = "id,first_name,last_name,email,created_at,latitude,longitude,role,otp\n\
                   1,NULL,,x@y.z,2024-03-05 09:00:00,NULL,NULL,NULL,NULL\n";
        let events = decode(raw).unwrap();
        let e = &events[0];
        assert_eq!(e.first_name, None);
        assert_eq!(e.last_name.as_deref(), Some(""));
        assert_eq!(e.email.as_deref(), Some("x@y.z"));
        assert_eq!(e.latitude, 0.0);
        assert_eq!(e.longitude, 0.0);
        assert_eq!(e.role, 0);
        assert_eq!(e.otp, 0);
    }

    #[test]
    fn test_decode_missing_columns_default() {
        let raw = "id,created_at\n4,2024-03-05 09:00:00\n";
        let e = &decode(raw).unwrap()[0];
        assert_eq!(e.first_name.as_deref(), Some(""));
        assert_eq!(e.email.as_deref(), Some(""));
        assert_eq!(e.latitude, 0.0);
        assert_eq!(e.phone, None);
    }

    #[test]
    fn test_decode_short_row_pads_with_empty() {
        let raw = "id,created_at,first_name,latitude\n4,2024-03-05 09:00:00\n";
        let e = &decode(raw).unwrap()[0];
        assert_eq!(e.first_name.as_deref(), Some(""));
        assert_eq!(e.latitude, 0.0);
    }

    #[test]
    fn test_decode_extra_fields_ignored() {
        let raw = "id,created_at\n4,2024-03-05 09:00:00,surplus,more\n";
        let events = decode(raw).unwrap();
        assert_eq!(events.len(), 1);
        assert!(events[0].extra.is_empty());
    }

    #[test]
    fn test_decode_unparseable_numbers_are_zero() {
        let raw = "id,created_at,latitude,role\nabc,2024-03-05 09:00:00,north,x1\n";
        let e = &decode(raw).unwrap()[0];
        assert_eq!(e.employee_id, 0);
        assert_eq!(e.latitude, 0.0);
        assert_eq!(e.role, 0);
    }

    #[test]
    fn test_decode_quoted_values_unquoted() {
        let raw = "\"id\",\"first_name\",\"created_at\"\n\"5\",\"Doe, Jane\",\"2024-03-05 09:00:00\"\n";
        let e = &decode(raw).unwrap()[0];
        assert_eq!(e.employee_id, 5);
        assert_eq!(e.first_name.as_deref(), Some("Doe, Jane"));
    }

    #[test]
    fn test_decode_phone_kept_verbatim() {
        let raw = "id,created_at,phone\n1,2024-03-05 09:00:00,NULL\n2,2024-03-05 09:00:00,555-0100\n";
        let events = decode(raw).unwrap();
        assert_eq!(events[0].phone.as_deref(), Some("NULL"));
        assert_eq!(events[1].phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_decode_unknown_headers_go_to_extra() {
        let raw = "id,created_at,device,site\n1,2024-03-05 09:00:00,kiosk-2,NULL\n";
        let e = &decode(raw).unwrap()[0];
        assert_eq!(e.extra.get("device"), Some(&Some("kiosk-2".to_string())));
        assert_eq!(e.extra.get("site"), Some(&None));
        assert!(!e.extra.contains_key("id"));
    }

    #[test]
    fn test_decode_duplicate_header_last_wins() {
        let raw = "id,first_name,created_at,first_name\n1,Alpha,2024-03-05 09:00:00,Omega\n";
        let e = &decode(raw).unwrap()[0];
        assert_eq!(e.first_name.as_deref(), Some("Omega"));
    }

    #[test]
    fn test_decode_skips_blank_lines_and_crlf() {
        let raw = "\r\n\nid,created_at\r\n1,2024-03-05 09:00:00\r\n\r\n   \n2,2024-03-06 09:00:00\r\n";
        let events = decode(raw).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].employee_id, 2);
    }

    #[test]
    fn test_decode_strips_bom() {
        let raw = "\u{feff}id,first_name,created_at\n\
                   1,Ada,2024-03-05 09:00:00\n\
                   2,Grace,2024-03-05 08:00:00\n";
        let events = decode(raw).unwrap();
        assert_eq!(events[0].employee_id, 1);
        assert_eq!(events[1].employee_id, 2);
        assert!(events[0].extra.is_empty());

        let raw = "\u{feff}created_at,id\n2024-03-05 09:00:00,1\n";
        let events = decode(raw).unwrap();
        assert_eq!(events[0].created_at, ts("2024-03-05 09:00:00"));
        assert_eq!(events[0].employee_id, 1);
    }

    #[test]
    fn test_decode_empty_input_is_error() {
        assert!(matches!(decode(""), Err(ClockInError::EmptyInput)));
        assert!(matches!(decode(" \n\n \r\n"), Err(ClockInError::EmptyInput)));
    }

    #[test]
    fn test_decode_header_only_is_error() {
        assert!(matches!(
            decode("id,created_at\n\n"),
            Err(ClockInError::NoDataRows)
        ));
    }

    #[test]
    fn test_decode_bad_timestamp_reports_line() {
        let raw = "id,created_at\n1,2024-03-05 09:00:00\n\n2,someday\n";
        match decode(raw) {
            Err(ClockInError::InvalidTimestamp { line, value }) => {
                assert_eq!(line, 4);
                assert_eq!(value, "someday");
            }
            other => panic!("expected InvalidTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_offset_timestamps_use_parser_zone() {
        let raw = "id,created_at\n1,2024-03-05T14:00:00Z\n";
        let parser = TimestampParser::new("America/New_York");
        let events = decode_events(raw, &parser, &NoopObserver).unwrap();
        assert_eq!(events[0].created_at, ts("2024-03-05 09:00:00"));
    }

    #[test]
    fn test_decode_notifies_observer() {
        let observer = RecordingObserver::default();
        let events = decode_events(SAMPLE, &TimestampParser::utc(), &observer).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(observer.headers.borrow()[0], "id");
        assert_eq!(*observer.decoded_lines.borrow(), vec![2, 3, 4]);
        assert_eq!(*observer.decoded.borrow(), Some(3));
    }

    // ── load_csv_file ─────────────────────────────────────────────────────────

    #[test]
    fn test_load_csv_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("user_locations.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let events = load_csv_file(&path, &TimestampParser::utc(), &NoopObserver).unwrap();
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_load_csv_file_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_csv_file(&path, &TimestampParser::utc(), &NoopObserver).unwrap_err();
        assert!(matches!(err, ClockInError::FileRead { .. }));
        assert!(err.is_parse_failure());
    }

    // ── lenient numbers ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_lenient_int() {
        assert_eq!(parse_lenient_int("42"), 42);
        assert_eq!(parse_lenient_int("42abc"), 42);
        assert_eq!(parse_lenient_int("-7"), -7);
        assert_eq!(parse_lenient_int("3.9"), 3);
        assert_eq!(parse_lenient_int(""), 0);
        assert_eq!(parse_lenient_int("NULL"), 0);
        assert_eq!(parse_lenient_int("-"), 0);
    }

    #[test]
    fn test_parse_lenient_float() {
        assert_eq!(parse_lenient_float("51.5"), 51.5);
        assert_eq!(parse_lenient_float("-0.25xyz"), -0.25);
        assert_eq!(parse_lenient_float(".5"), 0.5);
        assert_eq!(parse_lenient_float("1e3"), 1000.0);
        assert_eq!(parse_lenient_float("2e"), 2.0);
        assert_eq!(parse_lenient_float("NULL"), 0.0);
        assert_eq!(parse_lenient_float("."), 0.0);
        assert_eq!(parse_lenient_float(""), 0.0);
    }
}
