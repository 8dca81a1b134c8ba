//! Hooks the pipeline reports progress through.
//!
//! Decoding and aggregation never log directly; they call an observer so
//! callers decide where diagnostics go. [`TracingObserver`] forwards to
//! `tracing`, [`NoopObserver`] discards everything.

use clockin_core::models::{AttendanceEvent, YearMonth};
use tracing::debug;

/// Receives progress notifications from the decoder and aggregator.
///
/// Every method has an empty default so implementors pick what they need.
pub trait PipelineObserver {
    /// The header row was read.
    fn on_headers(&self, _headers: &[String]) {}

    /// One data row became an event. `line` is 1-based.
    fn on_row_decoded(&self, _line: usize, _event: &AttendanceEvent) {}

    /// Decoding finished.
    fn on_decoded(&self, _events: usize) {}

    /// Events were filtered down to `month`.
    fn on_month_filtered(&self, _month: YearMonth, _matched: usize, _total: usize) {}

    /// Filtered events were grouped into `employees` groups.
    fn on_grouped(&self, _month: YearMonth, _employees: usize) {}
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Forwards notifications to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_headers(&self, headers: &[String]) {
        debug!(?headers, "CSV headers");
    }

    fn on_decoded(&self, events: usize) {
        debug!(events, "decoded CSV rows");
    }

    fn on_month_filtered(&self, month: YearMonth, matched: usize, total: usize) {
        debug!(%month, matched, total, "filtered events for month");
    }

    fn on_grouped(&self, month: YearMonth, employees: usize) {
        debug!(%month, employees, "grouped events by employee");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Observer that records what it was told, for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingObserver {
        pub headers: RefCell<Vec<String>>,
        pub decoded_lines: RefCell<Vec<usize>>,
        pub decoded: RefCell<Option<usize>>,
        pub filtered: RefCell<Vec<(YearMonth, usize, usize)>>,
        pub grouped: RefCell<Vec<(YearMonth, usize)>>,
    }

    impl PipelineObserver for RecordingObserver {
        fn on_headers(&self, headers: &[String]) {
            *self.headers.borrow_mut() = headers.to_vec();
        }

        fn on_row_decoded(&self, line: usize, _event: &AttendanceEvent) {
            self.decoded_lines.borrow_mut().push(line);
        }

        fn on_decoded(&self, events: usize) {
            *self.decoded.borrow_mut() = Some(events);
        }

        fn on_month_filtered(&self, month: YearMonth, matched: usize, total: usize) {
            self.filtered.borrow_mut().push((month, matched, total));
        }

        fn on_grouped(&self, month: YearMonth, employees: usize) {
            self.grouped.borrow_mut().push((month, employees));
        }
    }
}
