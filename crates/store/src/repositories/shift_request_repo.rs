//! Repository for the `shift_requests` collection.

use chrono::Utc;
use shiftboard_core::shift_request::RequestStatus;

use crate::models::shift_request::{CreateShiftRequest, ShiftRequestDoc};
use crate::{new_doc_id, Store, StoreError};

/// Provides CRUD operations for swap / take-over requests.
pub struct ShiftRequestRepo;

impl ShiftRequestRepo {
    /// Insert a new request, entering the workflow at PENDING_TARGET.
    pub async fn create(store: &Store, input: CreateShiftRequest) -> ShiftRequestDoc {
        let now = Utc::now();
        let doc = ShiftRequestDoc {
            id: new_doc_id(),
            request_type: input.request_type,
            status: RequestStatus::PendingTarget,
            week_start: input.week_start,
            area: input.area,
            requester: input.requester,
            target: input.target,
            target_shift_id: input.target_shift_id,
            requester_shift_id: input.requester_shift_id,
            note: input.note,
            created_at: now,
            updated_at: now,
        };
        store
            .shift_requests
            .write()
            .await
            .insert(doc.id.clone(), doc.clone());
        doc
    }

    pub async fn find_by_id(store: &Store, id: &str) -> Option<ShiftRequestDoc> {
        store.shift_requests.read().await.get(id).cloned()
    }

    /// All requests, newest first.
    pub async fn list_all(store: &Store) -> Vec<ShiftRequestDoc> {
        let mut all: Vec<ShiftRequestDoc> = store
            .shift_requests
            .read()
            .await
            .values()
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Requests where the given identity is requester or target, newest
    /// first.
    pub async fn list_for_identity(store: &Store, uid: &str, email: &str) -> Vec<ShiftRequestDoc> {
        let mut mine: Vec<ShiftRequestDoc> = store
            .shift_requests
            .read()
            .await
            .values()
            .filter(|r| r.requester.is_identity(uid, email) || r.target.is_identity(uid, email))
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mine
    }

    /// Write a new status, bumping `updated_at`. Transition legality is
    /// checked by the caller against the core state machine.
    pub async fn set_status(
        store: &Store,
        id: &str,
        status: RequestStatus,
    ) -> Result<ShiftRequestDoc, StoreError> {
        let mut requests = store.shift_requests.write().await;
        let doc = requests.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: "shift_requests",
            id: id.to_string(),
        })?;
        doc.status = status;
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }
}
