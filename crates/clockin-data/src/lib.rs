//! Data layer for the clock-in report.
//!
//! Decodes CSV exports into attendance events, aggregates them into
//! per-employee monthly statistics and memoises results per month for the
//! interactive viewer.

pub mod aggregator;
pub mod analysis;
pub mod observer;
pub mod reader;

pub use clockin_core as core;
