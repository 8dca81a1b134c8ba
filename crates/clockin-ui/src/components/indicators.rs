use crate::themes::Theme;
use ratatui::text::{Line, Span};

use clockin_core::formatting::format_one_decimal;
use clockin_core::models::{AttendanceBadge, MonthOverview};
use clockin_core::punctuality::PunctualityTier;

// ── TierIndicator ────────────────────────────────────────────────────────────

/// A clock-in time coloured by its punctuality tier.
///
/// | Tier      | Marker |
/// |-----------|--------|
/// | on-time   | ●      |
/// | late      | ◐      |
/// | very-late | ○      |
pub struct TierIndicator<'a> {
    pub time: &'a str,
    pub tier: PunctualityTier,
    pub theme: &'a Theme,
}

impl<'a> TierIndicator<'a> {
    pub fn new(time: &'a str, tier: PunctualityTier, theme: &'a Theme) -> Self {
        Self { time, tier, theme }
    }

    pub fn marker(&self) -> &'static str {
        match self.tier {
            PunctualityTier::OnTime => "●",
            PunctualityTier::Late => "◐",
            PunctualityTier::VeryLate => "○",
        }
    }

    /// Spans `"● 9:00 AM"`, both styled by tier.
    pub fn to_spans(&self) -> Vec<Span<'a>> {
        let style = self.theme.tier_style(self.tier);
        vec![
            Span::styled(self.marker(), style),
            Span::raw(" "),
            Span::styled(self.time, style),
        ]
    }
}

// ── BadgeIndicator ───────────────────────────────────────────────────────────

/// Attendance badge for a days-worked count.
pub struct BadgeIndicator<'a> {
    pub badge: AttendanceBadge,
    pub theme: &'a Theme,
}

impl<'a> BadgeIndicator<'a> {
    pub fn for_days(days: u32, theme: &'a Theme) -> Self {
        Self {
            badge: AttendanceBadge::for_days(days),
            theme,
        }
    }

    pub fn to_span(&self) -> Span<'a> {
        Span::styled(self.badge.label(), self.theme.badge_style(self.badge))
    }
}

// ── OverviewLine ─────────────────────────────────────────────────────────────

/// One-line summary of a month:
/// `"Employees: 12 | Clock-ins: 180 | Avg days: 15.0 | Perfect: 3"`.
pub struct OverviewLine<'a> {
    pub overview: &'a MonthOverview,
    pub theme: &'a Theme,
}

impl<'a> OverviewLine<'a> {
    pub fn new(overview: &'a MonthOverview, theme: &'a Theme) -> Self {
        Self { overview, theme }
    }

    pub fn to_line(&self) -> Line<'a> {
        let sep = || Span::styled(" | ", self.theme.dim);
        Line::from(vec![
            Span::styled("Employees: ", self.theme.label),
            Span::styled(self.overview.total_employees.to_string(), self.theme.value),
            sep(),
            Span::styled("Clock-ins: ", self.theme.label),
            Span::styled(self.overview.total_clock_ins.to_string(), self.theme.value),
            sep(),
            Span::styled("Avg days: ", self.theme.label),
            Span::styled(
                format_one_decimal(self.overview.average_days_worked),
                self.theme.value,
            ),
            sep(),
            Span::styled("Perfect: ", self.theme.label),
            Span::styled(
                self.overview.perfect_attendance.to_string(),
                self.theme.badge_excellent,
            ),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
