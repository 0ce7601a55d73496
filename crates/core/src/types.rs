//! Shared primitive types used across the workspace.

use serde::{Deserialize, Serialize};

/// Document id in the store. The store hands out opaque string ids
/// (UUIDs in the in-process implementation, whatever the remote document
/// host generates otherwise).
pub type DocId = String;

/// UTC timestamp stamped on documents (`created_at`, `updated_at`,
/// `decided_at`).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// One of the two fixed organizational zones. Staff, shifts, and schedule
/// visibility are all partitioned by area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Area {
    Front,
    Back,
}

impl std::fmt::Display for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Area::Front => write!(f, "Front"),
            Area::Back => write!(f, "Back"),
        }
    }
}

/// The employee a shift is assigned to.
///
/// `name` is always present. `uid` and `email` may be empty when the staff
/// entry has not been claimed by an account yet ("unassigned account") --
/// such shifts are legal but skipped when resolving notification recipients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub uid: String,
    pub name: String,
    pub email: String,
}

impl Assignee {
    /// Whether this assignee can be reached by email.
    pub fn has_email(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Whether the given identity (uid or email) owns this assignment.
    ///
    /// Empty uid/email fields never match, so unassigned-account shifts
    /// are owned by nobody.
    pub fn is_identity(&self, uid: &str, email: &str) -> bool {
        (!self.uid.is_empty() && self.uid == uid)
            || (!self.email.is_empty() && self.email.eq_ignore_ascii_case(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_assignee_matches_nobody() {
        let a = Assignee {
            uid: String::new(),
            name: "New Hire".into(),
            email: String::new(),
        };
        assert!(!a.has_email());
        assert!(!a.is_identity("", ""));
        assert!(!a.is_identity("u1", "a@b.c"));
    }

    #[test]
    fn identity_matches_by_uid_or_email_case_insensitive() {
        let a = Assignee {
            uid: "u1".into(),
            name: "Ana".into(),
            email: "Ana@Example.com".into(),
        };
        assert!(a.is_identity("u1", "other@example.com"));
        assert!(a.is_identity("other", "ana@example.com"));
        assert!(!a.is_identity("u2", "bob@example.com"));
    }

    #[test]
    fn area_uses_the_wire_casing() {
        assert_eq!(serde_json::to_value(Area::Front).unwrap(), "FRONT");
        assert_eq!(serde_json::to_value(Area::Back).unwrap(), "BACK");
    }
}
