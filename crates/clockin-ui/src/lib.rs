//! Terminal UI layer for the attendance report.
//!
//! Provides themes, header and indicator components, the attendance table
//! and history views, the plain-text print report, and the viewer event
//! loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod history_view;
pub mod report;
pub mod table_view;
pub mod themes;

pub use clockin_core as core;
