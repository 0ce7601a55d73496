//! Repository for the `timeoff_requests` collection.

use chrono::{NaiveDate, Utc};
use shiftboard_core::timeoff::TimeOffStatus;

use crate::models::timeoff::{CreateTimeOff, TimeOffDoc};
use crate::{new_doc_id, Store, StoreError};

/// Provides CRUD operations for time-off requests.
pub struct TimeOffRepo;

impl TimeOffRepo {
    /// Insert a new request, entering the workflow at PENDING.
    pub async fn create(store: &Store, input: CreateTimeOff) -> TimeOffDoc {
        let doc = TimeOffDoc {
            id: new_doc_id(),
            uid: input.uid,
            employee_name: input.employee_name,
            employee_email: input.employee_email,
            date: input.date,
            time_off_type: input.time_off_type,
            note: input.note,
            status: TimeOffStatus::Pending,
            created_at: Utc::now(),
            decided_at: None,
            decided_by: None,
        };
        store
            .timeoff_requests
            .write()
            .await
            .insert(doc.id.clone(), doc.clone());
        doc
    }

    pub async fn find_by_id(store: &Store, id: &str) -> Option<TimeOffDoc> {
        store.timeoff_requests.read().await.get(id).cloned()
    }

    /// All requests, newest first, optionally filtered by status.
    pub async fn list(store: &Store, status: Option<TimeOffStatus>) -> Vec<TimeOffDoc> {
        let mut all: Vec<TimeOffDoc> = store
            .timeoff_requests
            .read()
            .await
            .values()
            .filter(|r| status.map_or(true, |st| r.status == st))
            .cloned()
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Requests filed by one employee, newest first.
    pub async fn list_for_uid(store: &Store, uid: &str) -> Vec<TimeOffDoc> {
        let mut mine: Vec<TimeOffDoc> = store
            .timeoff_requests
            .read()
            .await
            .values()
            .filter(|r| r.uid == uid)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mine
    }

    /// Approved time off for one employee on one date. Consulted by the
    /// manager's shift-creation path as an advisory block.
    pub async fn approved_for(store: &Store, uid: &str, date: NaiveDate) -> Vec<TimeOffDoc> {
        store
            .timeoff_requests
            .read()
            .await
            .values()
            .filter(|r| r.status == TimeOffStatus::Approved && r.uid == uid && r.date == date)
            .cloned()
            .collect()
    }

    /// Write a terminal status. When `decided_by` is given (manager
    /// decisions), `decided_by`/`decided_at` are stamped; cancellation
    /// leaves them unset. Transition legality is checked by the caller.
    pub async fn set_status(
        store: &Store,
        id: &str,
        status: TimeOffStatus,
        decided_by: Option<String>,
    ) -> Result<TimeOffDoc, StoreError> {
        let mut requests = store.timeoff_requests.write().await;
        let doc = requests.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: "timeoff_requests",
            id: id.to_string(),
        })?;
        doc.status = status;
        if let Some(by) = decided_by {
            doc.decided_by = Some(by);
            doc.decided_at = Some(Utc::now());
        }
        Ok(doc.clone())
    }
}
