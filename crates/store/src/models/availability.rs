//! Availability proposal documents and the per-employee effective record.

use serde::{Deserialize, Serialize};
use shiftboard_core::availability::{AvailabilityStatus, WeekPattern};
use shiftboard_core::types::{DocId, Timestamp};

/// A document from the `availability_requests` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequestDoc {
    pub id: DocId,
    pub uid: String,
    pub employee_name: String,
    pub employee_email: String,
    /// Where the approval request gets mailed.
    pub manager_email: String,
    pub proposed_days: WeekPattern,
    /// Human-readable form of `proposed_days`, stored at creation time.
    pub summary: String,
    pub status: AvailabilityStatus,
    pub created_at: Timestamp,
    pub decided_at: Option<Timestamp>,
    pub decided_by: Option<String>,
}

/// DTO for creating a new availability proposal. Status starts at PENDING;
/// the summary is derived from the pattern.
#[derive(Debug, Clone)]
pub struct CreateAvailabilityRequest {
    pub uid: String,
    pub employee_name: String,
    pub employee_email: String,
    pub manager_email: String,
    pub proposed_days: WeekPattern,
}

/// The single authoritative weekly pattern for one employee, from the
/// `availability_effective` collection (keyed by uid). Replaced wholesale
/// when a proposal is approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveAvailabilityDoc {
    pub uid: String,
    pub days: WeekPattern,
    pub updated_at: Timestamp,
    pub updated_by: String,
}
