use crate::themes::Theme;
use ratatui::text::{Line, Span};

use clockin_core::models::AttendanceBadge;

/// Configuration controlling visual appearance of a progress bar.
pub struct ProgressBarConfig {
    /// Total width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
}

impl Default for ProgressBarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── AttendanceBar ────────────────────────────────────────────────────────────

/// Days worked against the excellent-attendance target.
///
/// The fill is coloured by the employee's badge and the label shows
/// `days/target`. Counts above the target render a full bar.
pub struct AttendanceBar<'a> {
    pub days: u32,
    pub target: u32,
    pub theme: &'a Theme,
    pub config: ProgressBarConfig,
}

impl<'a> AttendanceBar<'a> {
    pub fn new(days: u32, theme: &'a Theme) -> Self {
        Self {
            days,
            target: AttendanceBadge::EXCELLENT_DAYS,
            theme,
            config: ProgressBarConfig::default(),
        }
    }

    /// Fraction of the target reached, clamped to `[0.0, 1.0]`.
    pub fn ratio(&self) -> f64 {
        if self.target == 0 {
            return 1.0;
        }
        (f64::from(self.days) / f64::from(self.target)).min(1.0)
    }

    pub fn to_line(&self) -> Line<'a> {
        let filled = (self.ratio() * f64::from(self.config.width)).round() as u16;
        let empty = self.config.width.saturating_sub(filled);
        let style = self
            .theme
            .badge_style(AttendanceBadge::for_days(self.days));

        let filled_str: String = std::iter::repeat(self.config.filled_char)
            .take(filled as usize)
            .collect();
        let empty_str: String = std::iter::repeat(self.config.empty_char)
            .take(empty as usize)
            .collect();

        Line::from(vec![
            Span::styled(filled_str, style),
            Span::styled(empty_str, self.theme.bar_empty),
            Span::styled(
                format!(" {}/{} days", self.days, self.target),
                self.theme.bar_label,
            ),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
