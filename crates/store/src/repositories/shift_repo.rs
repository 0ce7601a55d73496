//! Repository for the `shifts` collection, including the publish cycle
//! and the assignment mutations applied by approved shift requests.

use chrono::{NaiveDate, Utc};
use shiftboard_core::shift::{plus_week, previous_week, schedule_order_key, ShiftStatus};
use shiftboard_core::types::{Area, Assignee};

use crate::models::shift::{CreateShift, ShiftDoc};
use crate::{new_doc_id, Store, StoreError};

/// Provides CRUD and publish-cycle operations for shifts.
pub struct ShiftRepo;

impl ShiftRepo {
    /// Insert a new shift. Shifts always enter the store as drafts.
    pub async fn create(store: &Store, input: CreateShift) -> ShiftDoc {
        let doc = ShiftDoc {
            id: new_doc_id(),
            week_start: input.week_start,
            date: input.date,
            start: input.start,
            end: input.end,
            area: input.area,
            role: input.role,
            assignee: input.assignee,
            note: input.note,
            status: ShiftStatus::Draft,
            created_at: Utc::now(),
        };
        store
            .shifts
            .write()
            .await
            .insert(doc.id.clone(), doc.clone());
        doc
    }

    pub async fn find_by_id(store: &Store, id: &str) -> Option<ShiftDoc> {
        store.shifts.read().await.get(id).cloned()
    }

    /// Delete a draft shift. Published shifts are only ever removed by
    /// publish-replace, so deleting one here is a conflict.
    pub async fn delete_draft(store: &Store, id: &str) -> Result<ShiftDoc, StoreError> {
        let mut shifts = store.shifts.write().await;
        let doc = shifts.get(id).ok_or_else(|| StoreError::NotFound {
            collection: "shifts",
            id: id.to_string(),
        })?;
        if doc.status != ShiftStatus::Draft {
            return Err(StoreError::Conflict(
                "Only draft shifts can be deleted".into(),
            ));
        }
        Ok(shifts.remove(id).unwrap())
    }

    /// Shifts for one week + area, optionally filtered by status, ordered
    /// by date then start time.
    pub async fn list_week_area(
        store: &Store,
        week_start: NaiveDate,
        area: Area,
        status: Option<ShiftStatus>,
    ) -> Vec<ShiftDoc> {
        let mut matching: Vec<ShiftDoc> = store
            .shifts
            .read()
            .await
            .values()
            .filter(|s| {
                s.week_start == week_start
                    && s.area == area
                    && status.map_or(true, |st| s.status == st)
            })
            .cloned()
            .collect();
        matching.sort_by_key(|s| schedule_order_key(s.date, s.start));
        matching
    }

    /// Publish the week's drafts for one area: a full replace.
    ///
    /// Every already-published shift for that week + area is deleted, then
    /// every draft flips to published, all under one collection lock. The
    /// prior live schedule is gone once this returns. Errors without any
    /// mutation when the week has no drafts.
    ///
    /// Returns the newly published shifts ordered by date then start time.
    pub async fn publish_week(
        store: &Store,
        week_start: NaiveDate,
        area: Area,
    ) -> Result<Vec<ShiftDoc>, StoreError> {
        let mut shifts = store.shifts.write().await;

        let draft_ids: Vec<String> = shifts
            .values()
            .filter(|s| {
                s.week_start == week_start && s.area == area && s.status == ShiftStatus::Draft
            })
            .map(|s| s.id.clone())
            .collect();
        if draft_ids.is_empty() {
            return Err(StoreError::Conflict(format!(
                "No draft shifts to publish for week {week_start} ({area})"
            )));
        }

        let stale_ids: Vec<String> = shifts
            .values()
            .filter(|s| {
                s.week_start == week_start && s.area == area && s.status == ShiftStatus::Published
            })
            .map(|s| s.id.clone())
            .collect();
        for id in &stale_ids {
            shifts.remove(id);
        }

        let mut published = Vec::with_capacity(draft_ids.len());
        for id in &draft_ids {
            let doc = shifts.get_mut(id).unwrap();
            doc.status = ShiftStatus::Published;
            published.push(doc.clone());
        }
        published.sort_by_key(|s| schedule_order_key(s.date, s.start));

        tracing::debug!(
            week_start = %week_start,
            area = %area,
            replaced = stale_ids.len(),
            published = published.len(),
            "Published week schedule"
        );
        Ok(published)
    }

    /// Clone the previous week's schedule into `week_start` as drafts.
    ///
    /// Sources the previous week's published shifts when any exist,
    /// otherwise its drafts; errors when the previous week is empty.
    /// Clones keep assignment, start/end, role, and note; dates shift
    /// forward seven days and status is forced to draft.
    pub async fn duplicate_from_previous_week(
        store: &Store,
        week_start: NaiveDate,
        area: Area,
    ) -> Result<Vec<ShiftDoc>, StoreError> {
        let source_week = previous_week(week_start);
        let mut shifts = store.shifts.write().await;

        let pick = |status: ShiftStatus, shifts: &std::collections::HashMap<String, ShiftDoc>| {
            shifts
                .values()
                .filter(|s| s.week_start == source_week && s.area == area && s.status == status)
                .cloned()
                .collect::<Vec<_>>()
        };
        let mut source = pick(ShiftStatus::Published, &shifts);
        if source.is_empty() {
            source = pick(ShiftStatus::Draft, &shifts);
        }
        if source.is_empty() {
            return Err(StoreError::Conflict(format!(
                "Week {source_week} ({area}) has no shifts to duplicate"
            )));
        }
        source.sort_by_key(|s| schedule_order_key(s.date, s.start));

        let now = Utc::now();
        let mut clones = Vec::with_capacity(source.len());
        for src in source {
            let doc = ShiftDoc {
                id: new_doc_id(),
                week_start,
                date: plus_week(src.date),
                start: src.start,
                end: src.end,
                area: src.area,
                role: src.role,
                assignee: src.assignee,
                note: src.note,
                status: ShiftStatus::Draft,
                created_at: now,
            };
            shifts.insert(doc.id.clone(), doc.clone());
            clones.push(doc);
        }
        Ok(clones)
    }

    /// Reassign a published shift to a new employee (TAKE approval).
    ///
    /// Fails without mutation when the shift is gone or no longer
    /// published.
    pub async fn reassign(
        store: &Store,
        id: &str,
        assignee: Assignee,
    ) -> Result<ShiftDoc, StoreError> {
        let mut shifts = store.shifts.write().await;
        let doc = shifts.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: "shifts",
            id: id.to_string(),
        })?;
        if doc.status != ShiftStatus::Published {
            return Err(StoreError::Conflict(format!(
                "Shift {id} is not published"
            )));
        }
        doc.assignee = assignee;
        Ok(doc.clone())
    }

    /// Swap the assignees of two published shifts (SWAP approval).
    ///
    /// Both checks and both writes happen under one collection lock, so
    /// either both shifts change hands or neither does.
    pub async fn swap_assignees(
        store: &Store,
        id_a: &str,
        id_b: &str,
    ) -> Result<(ShiftDoc, ShiftDoc), StoreError> {
        let mut shifts = store.shifts.write().await;

        for id in [id_a, id_b] {
            let doc = shifts.get(id).ok_or_else(|| StoreError::NotFound {
                collection: "shifts",
                id: id.to_string(),
            })?;
            if doc.status != ShiftStatus::Published {
                return Err(StoreError::Conflict(format!(
                    "Shift {id} is not published"
                )));
            }
        }

        let assignee_a = shifts.get(id_a).unwrap().assignee.clone();
        let assignee_b = shifts.get(id_b).unwrap().assignee.clone();
        shifts.get_mut(id_a).unwrap().assignee = assignee_b;
        shifts.get_mut(id_b).unwrap().assignee = assignee_a;

        Ok((
            shifts.get(id_a).unwrap().clone(),
            shifts.get(id_b).unwrap().clone(),
        ))
    }
}
