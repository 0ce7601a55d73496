//! Shift-request (swap / take-over) documents and creation DTO.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shiftboard_core::shift_request::{RequestStatus, RequestType};
use shiftboard_core::types::{Area, Assignee, DocId, Timestamp};

/// A document from the `shift_requests` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequestDoc {
    pub id: DocId,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub status: RequestStatus,
    pub week_start: NaiveDate,
    pub area: Area,
    /// Who is asking.
    pub requester: Assignee,
    /// The current owner of the wanted shift; decides first.
    pub target: Assignee,
    /// The shift being taken or received in the swap.
    pub target_shift_id: DocId,
    /// The shift offered in return. Present iff `request_type` is SWAP.
    pub requester_shift_id: Option<DocId>,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new shift request. Status starts at PENDING_TARGET.
#[derive(Debug, Clone)]
pub struct CreateShiftRequest {
    pub request_type: RequestType,
    pub week_start: NaiveDate,
    pub area: Area,
    pub requester: Assignee,
    pub target: Assignee,
    pub target_shift_id: DocId,
    pub requester_shift_id: Option<DocId>,
    pub note: Option<String>,
}
