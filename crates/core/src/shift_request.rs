//! Shift-request (swap / take-over) state machine.
//!
//! Two-stage approval: the shift's current owner decides first, then the
//! manager. The transition table is centralized here so the store and API
//! layers never compare status strings inline.
//!
//! ```text
//! PENDING_TARGET -> REJECTED_BY_TARGET | PENDING_MANAGER | CANCELLED
//! PENDING_MANAGER -> REJECTED_BY_MANAGER | APPROVED_BY_MANAGER | CANCELLED
//! ```
//!
//! Everything else is terminal.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What the requester wants: take the target's shift outright, or swap it
/// against one of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Take,
    Swap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    PendingTarget,
    RejectedByTarget,
    PendingManager,
    RejectedByManager,
    ApprovedByManager,
    Cancelled,
}

impl RequestStatus {
    /// The set of states reachable from `self`. Terminal states return an
    /// empty slice.
    pub fn valid_transitions(self) -> &'static [RequestStatus] {
        use RequestStatus::*;
        match self {
            PendingTarget => &[RejectedByTarget, PendingManager, Cancelled],
            PendingManager => &[RejectedByManager, ApprovedByManager, Cancelled],
            RejectedByTarget | RejectedByManager | ApprovedByManager | Cancelled => &[],
        }
    }

    pub fn can_transition(self, to: RequestStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a transition, with a state-conflict error for invalid ones.
    pub fn validate_transition(self, to: RequestStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Invalid shift-request transition: {self:?} -> {to:?}"
            )))
        }
    }

    pub fn is_terminal(self) -> bool {
        self.valid_transitions().is_empty()
    }

    /// The requester may cancel only before the manager has decided.
    pub fn cancellable(self) -> bool {
        self.can_transition(RequestStatus::Cancelled)
    }
}

/// Validate the fields of a new request.
///
/// - the target must have a resolvable email (we cannot notify otherwise);
/// - the requester must not already own the target shift;
/// - a SWAP must offer one of the requester's own shifts in return.
pub fn validate_create(
    request_type: RequestType,
    target_has_email: bool,
    requester_owns_target: bool,
    offered_shift: Option<&str>,
) -> Result<(), CoreError> {
    if !target_has_email {
        return Err(CoreError::Validation(
            "Target employee has no email on file and cannot be notified".into(),
        ));
    }
    if requester_owns_target {
        return Err(CoreError::Validation(
            "You already own this shift".into(),
        ));
    }
    if request_type == RequestType::Swap && offered_shift.is_none() {
        return Err(CoreError::Validation(
            "A swap request must offer one of your own shifts".into(),
        ));
    }
    Ok(())
}
