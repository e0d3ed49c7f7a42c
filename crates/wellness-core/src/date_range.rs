//! The lookback window a digest covers.

use chrono::{Days, Local, NaiveDate};

/// Length of the digest lookback window.
pub const LOOKBACK_DAYS: u64 = 7;

/// ISO calendar-date format used everywhere dates are rendered as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive pair of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The seven days ending on `today`.
    #[must_use]
    pub fn last_week(today: NaiveDate) -> Self {
        // Subtracting a week only fails at the very start of chrono's date range.
        let start = today
            .checked_sub_days(Days::new(LOOKBACK_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// The seven days ending today on the local clock.
    #[must_use]
    pub fn resolve_last_week() -> Self {
        Self::last_week(Local::now().date_naive())
    }

    #[must_use]
    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    #[must_use]
    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }

    /// Renders the range as the `"<start> <end>"` instruction string the
    /// source adapters accept.
    #[must_use]
    pub fn to_tool_input(&self) -> String {
        format!("{} {}", self.start_str(), self.end_str())
    }

    /// Like [`DateRange::to_tool_input`], with a double-quoted topic appended.
    #[must_use]
    pub fn to_tool_input_with_topic(&self, topic: &str) -> String {
        format!("{} \"{topic}\"", self.to_tool_input())
    }

    /// Human-readable period, e.g. `2025-03-01 to 2025-03-08`.
    #[must_use]
    pub fn describe(&self) -> String {
        format!("{} to {}", self.start_str(), self.end_str())
    }
}
