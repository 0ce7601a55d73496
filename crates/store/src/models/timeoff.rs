//! Time-off request documents and creation DTO.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shiftboard_core::timeoff::{TimeOffStatus, TimeOffType};
use shiftboard_core::types::{DocId, Timestamp};

/// A document from the `timeoff_requests` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOffDoc {
    pub id: DocId,
    pub uid: String,
    pub employee_name: String,
    pub employee_email: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub time_off_type: TimeOffType,
    pub note: Option<String>,
    pub status: TimeOffStatus,
    pub created_at: Timestamp,
    pub decided_at: Option<Timestamp>,
    /// Email of the deciding manager.
    pub decided_by: Option<String>,
}

/// DTO for creating a new time-off request. Status starts at PENDING.
#[derive(Debug, Clone)]
pub struct CreateTimeOff {
    pub uid: String,
    pub employee_name: String,
    pub employee_email: String,
    pub date: NaiveDate,
    pub time_off_type: TimeOffType,
    pub note: Option<String>,
}
