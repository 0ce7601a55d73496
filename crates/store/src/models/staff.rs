//! Staff directory documents.

use serde::{Deserialize, Serialize};
use shiftboard_core::types::{Area, DocId, Timestamp};

/// A document from the `staff` collection.
///
/// A manager creates an entry with name + area only. `email` and
/// `claimed_by_uid` stay empty until an account claims the entry
/// (first-claim-wins, no reassignment).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffDoc {
    pub id: DocId,
    pub name: String,
    pub area: Area,
    /// Empty until set by a manager or filled in at claim time.
    pub email: String,
    /// Empty until claimed; the claiming account's uid afterwards.
    pub claimed_by_uid: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StaffDoc {
    pub fn is_claimed(&self) -> bool {
        !self.claimed_by_uid.is_empty()
    }
}
