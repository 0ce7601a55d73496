//! Weekly availability patterns and the availability-change lifecycle.
//!
//! Each employee has at most one "effective" pattern; approving a proposal
//! replaces it wholesale. An employee with no stored record is treated as
//! open every day.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayStatus {
    Open,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl AvailabilityStatus {
    pub fn valid_transitions(self) -> &'static [AvailabilityStatus] {
        use AvailabilityStatus::*;
        match self {
            Pending => &[Approved, Rejected, Cancelled],
            Approved | Rejected | Cancelled => &[],
        }
    }

    pub fn can_transition(self, to: AvailabilityStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    pub fn validate_transition(self, to: AvailabilityStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Invalid availability transition: {self:?} -> {to:?}"
            )))
        }
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// A full week's OPEN/UNAVAILABLE pattern, one entry per day. Days left
/// out of the wire form are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekPattern {
    pub mon: DayStatus,
    pub tue: DayStatus,
    pub wed: DayStatus,
    pub thu: DayStatus,
    pub fri: DayStatus,
    pub sat: DayStatus,
    pub sun: DayStatus,
}

impl Default for WeekPattern {
    /// All days open -- the effective pattern for any employee with no
    /// stored record.
    fn default() -> Self {
        Self {
            mon: DayStatus::Open,
            tue: DayStatus::Open,
            wed: DayStatus::Open,
            thu: DayStatus::Open,
            fri: DayStatus::Open,
            sat: DayStatus::Open,
            sun: DayStatus::Open,
        }
    }
}

impl WeekPattern {
    /// The status for a given weekday.
    pub fn day(&self, weekday: Weekday) -> DayStatus {
        match weekday {
            Weekday::Mon => self.mon,
            Weekday::Tue => self.tue,
            Weekday::Wed => self.wed,
            Weekday::Thu => self.thu,
            Weekday::Fri => self.fri,
            Weekday::Sat => self.sat,
            Weekday::Sun => self.sun,
        }
    }

    /// Human-readable one-liner stored alongside proposals and used in
    /// notification bodies.
    pub fn summary(&self) -> String {
        const LABELS: [(&str, Weekday); 7] = [
            ("Mon", Weekday::Mon),
            ("Tue", Weekday::Tue),
            ("Wed", Weekday::Wed),
            ("Thu", Weekday::Thu),
            ("Fri", Weekday::Fri),
            ("Sat", Weekday::Sat),
            ("Sun", Weekday::Sun),
        ];
        let unavailable: Vec<&str> = LABELS
            .iter()
            .filter(|(_, wd)| self.day(*wd) == DayStatus::Unavailable)
            .map(|(label, _)| *label)
            .collect();
        if unavailable.is_empty() {
            "All days OPEN".to_string()
        } else {
            format!("Unavailable: {}", unavailable.join(", "))
        }
    }
}
