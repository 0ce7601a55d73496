//! Time-off request lifecycle and advance-notice validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeOffType {
    Full,
    HalfAm,
    HalfPm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeOffStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl TimeOffStatus {
    pub fn valid_transitions(self) -> &'static [TimeOffStatus] {
        use TimeOffStatus::*;
        match self {
            Pending => &[Approved, Rejected, Cancelled],
            Approved | Rejected | Cancelled => &[],
        }
    }

    pub fn can_transition(self, to: TimeOffStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    pub fn validate_transition(self, to: TimeOffStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Invalid time-off transition: {self:?} -> {to:?}"
            )))
        }
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }
}

/// A request must be filed at least `min_notice_days` ahead:
/// `date >= today + min_notice_days`. The boundary day itself is accepted.
pub fn validate_notice(
    date: NaiveDate,
    today: NaiveDate,
    min_notice_days: u32,
) -> Result<(), CoreError> {
    let earliest = today
        .checked_add_days(chrono::Days::new(min_notice_days as u64))
        .unwrap_or(today);
    if date < earliest {
        return Err(CoreError::Validation(format!(
            "Time off must be requested at least {min_notice_days} day(s) in advance \
             (earliest allowed date: {earliest})"
        )));
    }
    Ok(())
}
