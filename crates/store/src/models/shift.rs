//! Shift documents and creation DTO.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shiftboard_core::shift::ShiftStatus;
use shiftboard_core::types::{Area, Assignee, DocId, Timestamp};

/// A document from the `shifts` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftDoc {
    pub id: DocId,
    /// Monday of the week this shift belongs to.
    pub week_start: NaiveDate,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub area: Area,
    /// Free-text role, e.g. "Server" or "Dishwasher".
    pub role: String,
    pub assignee: Assignee,
    /// Optional free-text remark, e.g. "1 hour break".
    pub note: Option<String>,
    pub status: ShiftStatus,
    pub created_at: Timestamp,
}

/// DTO for creating a new shift. Shifts are always created as drafts.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShift {
    pub week_start: NaiveDate,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub area: Area,
    pub role: String,
    pub assignee: Assignee,
    pub note: Option<String>,
}
