//! Repository for the `staff` collection.

use chrono::Utc;
use shiftboard_core::staff::{check_claim, normalize_email, ClaimOutcome};
use shiftboard_core::types::Area;

use crate::models::staff::StaffDoc;
use crate::{new_doc_id, Store, StoreError};

/// Provides CRUD operations for staff directory entries.
pub struct StaffRepo;

impl StaffRepo {
    /// Insert a new staff entry with name + area only; email and claim
    /// start empty.
    pub async fn create(store: &Store, name: &str, area: Area) -> StaffDoc {
        let now = Utc::now();
        let doc = StaffDoc {
            id: new_doc_id(),
            name: name.to_string(),
            area,
            email: String::new(),
            claimed_by_uid: String::new(),
            created_at: now,
            updated_at: now,
        };
        store
            .staff
            .write()
            .await
            .insert(doc.id.clone(), doc.clone());
        doc
    }

    /// All staff entries, ordered by name.
    pub async fn list(store: &Store) -> Vec<StaffDoc> {
        let mut all: Vec<StaffDoc> = store.staff.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Staff entries for one area, ordered by name.
    pub async fn list_by_area(store: &Store, area: Area) -> Vec<StaffDoc> {
        let mut all: Vec<StaffDoc> = store
            .staff
            .read()
            .await
            .values()
            .filter(|s| s.area == area)
            .cloned()
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub async fn find_by_id(store: &Store, id: &str) -> Option<StaffDoc> {
        store.staff.read().await.get(id).cloned()
    }

    /// Find the entry carrying the given email (normalized comparison).
    pub async fn find_by_email(store: &Store, email: &str) -> Option<StaffDoc> {
        let needle = normalize_email(email);
        if needle.is_empty() {
            return None;
        }
        store
            .staff
            .read()
            .await
            .values()
            .find(|s| s.email == needle)
            .cloned()
    }

    /// Find the entry claimed by the given account uid.
    pub async fn find_by_claim_uid(store: &Store, uid: &str) -> Option<StaffDoc> {
        if uid.is_empty() {
            return None;
        }
        store
            .staff
            .read()
            .await
            .values()
            .find(|s| s.claimed_by_uid == uid)
            .cloned()
    }

    /// Set (or replace) the entry's email address.
    pub async fn set_email(store: &Store, id: &str, email: &str) -> Result<StaffDoc, StoreError> {
        let mut staff = store.staff.write().await;
        let doc = staff.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: "staff",
            id: id.to_string(),
        })?;
        doc.email = normalize_email(email);
        doc.updated_at = Utc::now();
        Ok(doc.clone())
    }

    /// Bind an account to the entry, first-claim-wins.
    ///
    /// Checked and written under one collection lock: the claim only
    /// proceeds while the entry is unclaimed. A repeat claim by the same
    /// account is a no-op; anyone else gets a conflict. The account's
    /// email is recorded on the entry when none is set yet.
    pub async fn claim(
        store: &Store,
        id: &str,
        uid: &str,
        email: &str,
    ) -> Result<StaffDoc, StoreError> {
        let mut staff = store.staff.write().await;
        let doc = staff.get_mut(id).ok_or_else(|| StoreError::NotFound {
            collection: "staff",
            id: id.to_string(),
        })?;

        match check_claim(&doc.claimed_by_uid, uid) {
            Ok(ClaimOutcome::Claim) => {
                doc.claimed_by_uid = uid.to_string();
                if doc.email.is_empty() {
                    doc.email = normalize_email(email);
                }
                doc.updated_at = Utc::now();
                Ok(doc.clone())
            }
            Ok(ClaimOutcome::AlreadyOwn) => Ok(doc.clone()),
            Err(err) => Err(StoreError::Conflict(err.to_string())),
        }
    }

    pub async fn remove(store: &Store, id: &str) -> Result<(), StoreError> {
        store
            .staff
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                collection: "staff",
                id: id.to_string(),
            })
    }
}
