//! Small line-level widgets shared by the views.

pub mod header;
pub mod indicators;
pub mod progress_bar;

pub use header::Header;
pub use indicators::{BadgeIndicator, OverviewLine, TierIndicator};
pub use progress_bar::AttendanceBar;
