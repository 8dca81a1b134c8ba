use ratatui::style::{Color, Modifier, Style};

use clockin_core::models::AttendanceBadge;
use clockin_core::punctuality::PunctualityTier;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Every style the attendance views draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub warning: Style,

    // ── Attendance bar ───────────────────────────────────────────────────────
    pub bar_empty: Style,
    pub bar_label: Style,

    // ── Punctuality tiers ────────────────────────────────────────────────────
    pub tier_on_time: Style,
    pub tier_late: Style,
    pub tier_very_late: Style,

    // ── Badges ───────────────────────────────────────────────────────────────
    pub badge_excellent: Style,
    pub badge_good: Style,
    pub badge_fair: Style,
    pub badge_poor: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    /// Row under the cursor.
    pub table_selected: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),

            bar_empty: Style::default().fg(Color::DarkGray),
            bar_label: Style::default().fg(Color::Gray),

            tier_on_time: Style::default().fg(Color::Green),
            tier_late: Style::default().fg(Color::Yellow),
            tier_very_late: Style::default().fg(Color::Red),

            badge_excellent: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            badge_good: Style::default().fg(Color::Cyan),
            badge_fair: Style::default().fg(Color::Yellow),
            badge_poor: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so that content remains legible against a
    /// white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            warning: Style::default().fg(Color::Yellow),

            bar_empty: Style::default().fg(Color::Gray),
            bar_label: Style::default().fg(Color::DarkGray),

            tier_on_time: Style::default().fg(Color::Green),
            tier_late: Style::default().fg(Color::Yellow),
            tier_very_late: Style::default().fg(Color::Red),

            badge_excellent: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            badge_good: Style::default().fg(Color::Blue),
            badge_fair: Style::default().fg(Color::Yellow),
            badge_poor: Style::default().fg(Color::Red),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    pub fn tier_style(&self, tier: PunctualityTier) -> Style {
        match tier {
            PunctualityTier::OnTime => self.tier_on_time,
            PunctualityTier::Late => self.tier_late,
            PunctualityTier::VeryLate => self.tier_very_late,
        }
    }

    pub fn badge_style(&self, badge: AttendanceBadge) -> Style {
        match badge {
            AttendanceBadge::Excellent => self.badge_excellent,
            AttendanceBadge::Good => self.badge_good,
            AttendanceBadge::Fair => self.badge_fair,
            AttendanceBadge::Poor => self.badge_poor,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
