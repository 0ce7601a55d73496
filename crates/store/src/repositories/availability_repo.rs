//! Repository for availability proposals and the per-employee effective
//! pattern.

use chrono::Utc;
use shiftboard_core::availability::{AvailabilityStatus, WeekPattern};

use crate::models::availability::{
    AvailabilityRequestDoc, CreateAvailabilityRequest, EffectiveAvailabilityDoc,
};
use crate::{new_doc_id, Store, StoreError};

/// Provides operations for the `availability_requests` and
/// `availability_effective` collections.
pub struct AvailabilityRepo;

impl AvailabilityRepo {
    /// Insert a new proposal, entering the workflow at PENDING. The
    /// human-readable summary is derived from the pattern at creation
    /// time, matching what notification bodies show.
    pub async fn create(store: &Store, input: CreateAvailabilityRequest) -> AvailabilityRequestDoc {
        let doc = AvailabilityRequestDoc {
            id: new_doc_id(),
            uid: input.uid,
            employee_name: input.employee_name,
            employee_email: input.employee_email,
            manager_email: input.manager_email,
            summary: input.proposed_days.summary(),
            proposed_days: input.proposed_days,
            status: AvailabilityStatus::Pending,
            created_at: Utc::now(),
            decided_at: None,
            decided_by: None,
        };
        store
            .availability_requests
            .write()
            .await
            .insert(doc.id.clone(), doc.clone());
        doc
    }

    pub async fn find_by_id(store: &Store, id: &str) -> Option<AvailabilityRequestDoc> {
        store.availability_requests.read().await.get(id).cloned()
    }

    /// Pending proposals, newest first.
    pub async fn list_pending(store: &Store) -> Vec<AvailabilityRequestDoc> {
        let mut pending: Vec<AvailabilityRequestDoc> = store
            .availability_requests
            .read()
            .await
            .values()
            .filter(|r| r.status == AvailabilityStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        pending
    }

    /// Proposals filed by one employee, newest first.
    pub async fn list_for_uid(store: &Store, uid: &str) -> Vec<AvailabilityRequestDoc> {
        let mut mine: Vec<AvailabilityRequestDoc> = store
            .availability_requests
            .read()
            .await
            .values()
            .filter(|r| r.uid == uid)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mine
    }

    /// Write a terminal status; manager decisions stamp
    /// `decided_by`/`decided_at`. Transition legality is checked by the
    /// caller.
    pub async fn set_status(
        store: &Store,
        id: &str,
        status: AvailabilityStatus,
        decided_by: Option<String>,
    ) -> Result<AvailabilityRequestDoc, StoreError> {
        let mut requests = store.availability_requests.write().await;
        let doc = requests.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: "availability_requests",
            id: id.to_string(),
        })?;
        doc.status = status;
        if let Some(by) = decided_by {
            doc.decided_by = Some(by);
            doc.decided_at = Some(Utc::now());
        }
        Ok(doc.clone())
    }

    /// The employee's effective pattern, if one has ever been approved.
    /// Callers treat `None` as all-days-open.
    pub async fn effective_for(store: &Store, uid: &str) -> Option<EffectiveAvailabilityDoc> {
        store.availability_effective.read().await.get(uid).cloned()
    }

    /// Replace (not merge) the employee's effective pattern.
    pub async fn set_effective(
        store: &Store,
        uid: &str,
        days: WeekPattern,
        updated_by: &str,
    ) -> EffectiveAvailabilityDoc {
        let doc = EffectiveAvailabilityDoc {
            uid: uid.to_string(),
            days,
            updated_at: Utc::now(),
            updated_by: updated_by.to_string(),
        };
        store
            .availability_effective
            .write()
            .await
            .insert(uid.to_string(), doc.clone());
        doc
    }
}
