use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the clock-in report.
#[derive(Error, Debug)]
pub enum ClockInError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV text contained nothing but whitespace.
    #[error("CSV input is empty")]
    EmptyInput,

    /// The CSV text had a header row but no data rows.
    #[error("CSV input has a header row but no data rows")]
    NoDataRows,

    /// A `created_at` value did not match any recognised timestamp format.
    #[error("Invalid timestamp on line {line}: {value:?}")]
    InvalidTimestamp { line: usize, value: String },

    /// A month selector was not of the form `YYYY-MM`.
    #[error("Invalid month {0:?}, expected YYYY-MM")]
    InvalidMonth(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClockInError {
    /// `true` for failures that mean the uploaded file could not be turned
    /// into attendance events.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            ClockInError::FileRead { .. }
                | ClockInError::EmptyInput
                | ClockInError::NoDataRows
                | ClockInError::InvalidTimestamp { .. }
        )
    }
}

/// Convenience alias used throughout the clock-in crates.
pub type Result<T> = std::result::Result<T, ClockInError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ClockInError::FileRead {
            path: PathBuf::from("/some/user_locations.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/user_locations.csv"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_empty_input() {
        assert_eq!(ClockInError::EmptyInput.to_string(), "CSV input is empty");
    }

    #[test]
    fn test_error_display_invalid_timestamp() {
        let err = ClockInError::InvalidTimestamp {
            line: 4,
            value: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid timestamp on line 4: \"yesterday\"");
    }

    #[test]
    fn test_error_display_invalid_month() {
        let err = ClockInError::InvalidMonth("2024-13".to_string());
        assert_eq!(err.to_string(), "Invalid month \"2024-13\", expected YYYY-MM");
    }

    #[test]
    fn test_error_display_config() {
        let err = ClockInError::Config("bad theme".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad theme");
    }

    #[test]
    fn test_parse_failure_classification() {
        assert!(ClockInError::EmptyInput.is_parse_failure());
        assert!(ClockInError::NoDataRows.is_parse_failure());
        assert!(!ClockInError::InvalidMonth("x".into()).is_parse_failure());
        assert!(!ClockInError::Config("x".into()).is_parse_failure());
    }
}
