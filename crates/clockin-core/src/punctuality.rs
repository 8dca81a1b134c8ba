//! Punctuality tiers for individual clock-ins.
//!
//! Two threshold schedules exist. Employees on the flexible allow-list are
//! judged against a 9:00 AM start; everyone else against 8:00 AM for morning
//! clock-ins and 6:00 PM for evening ones.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time_utils::{clock_hour, clock_to_minutes, is_pm};

/// How punctual a single clock-in was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PunctualityTier {
    OnTime,
    Late,
    VeryLate,
}

impl PunctualityTier {
    pub fn label(&self) -> &'static str {
        match self {
            PunctualityTier::OnTime => "on-time",
            PunctualityTier::Late => "late",
            PunctualityTier::VeryLate => "very-late",
        }
    }
}

impl fmt::Display for PunctualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which threshold schedule applies to an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// 9:00 / 9:30 AM cut-offs.
    Flexible,
    /// 8:00 / 8:30 AM cut-offs, 6:00 / 6:30 PM for evening clock-ins.
    Standard,
}

/// Inclusive `(on_time, late)` cut-offs in minutes since midnight.
type Cutoffs = (u32, u32);

const FLEXIBLE: Cutoffs = (9 * 60, 9 * 60 + 30);
const STANDARD_MORNING: Cutoffs = (8 * 60, 8 * 60 + 30);
const STANDARD_EVENING: Cutoffs = (18 * 60, 18 * 60 + 30);

/// Selects a [`Schedule`] per employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunctualityPolicy {
    /// Employees judged on the flexible schedule.
    #[serde(default)]
    pub flexible_ids: BTreeSet<i64>,
}

impl PunctualityPolicy {
    pub fn new(flexible_ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            flexible_ids: flexible_ids.into_iter().collect(),
        }
    }

    pub fn schedule_for(&self, employee_id: i64) -> Schedule {
        if self.flexible_ids.contains(&employee_id) {
            Schedule::Flexible
        } else {
            Schedule::Standard
        }
    }
}

/// Classify a formatted clock-in time (`H:MM AM/PM`) for `employee_id`.
///
/// Under the standard schedule `12:xx PM` is judged against the morning
/// cut-offs, which always makes it very late. Strings that are not a clock
/// time classify as very late.
pub fn classify(employee_id: i64, time: &str, policy: &PunctualityPolicy) -> PunctualityTier {
    let Some(minutes) = clock_to_minutes(time) else {
        return PunctualityTier::VeryLate;
    };

    let cutoffs = match policy.schedule_for(employee_id) {
        Schedule::Flexible => FLEXIBLE,
        Schedule::Standard => {
            let pm = is_pm(time).unwrap_or(false);
            if !pm || clock_hour(time) == Some(12) {
                STANDARD_MORNING
            } else {
                STANDARD_EVENING
            }
        }
    };

    tier_for(minutes, cutoffs)
}

fn tier_for(minutes: u32, (on_time, late): Cutoffs) -> PunctualityTier {
    if minutes <= on_time {
        PunctualityTier::OnTime
    } else if minutes <= late {
        PunctualityTier::Late
    } else {
        PunctualityTier::VeryLate
    }
}
