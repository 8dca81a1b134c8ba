//! Core types and pure helpers for the clock-in attendance report.
//!
//! Holds the attendance data model, the error type, timestamp parsing and
//! 12-hour clock formatting, punctuality classification, and the command
//! line / config-file settings shared by the other crates.

pub mod error;
pub mod formatting;
pub mod models;
pub mod punctuality;
pub mod settings;
pub mod time_utils;
