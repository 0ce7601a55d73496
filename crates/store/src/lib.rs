//! Document collections and repositories for the shiftboard backend.
//!
//! The persistence host is a remote document store with no cross-document
//! transactions; this crate is the typed in-process layer the workflows
//! call. Collections are backed by `tokio::sync::RwLock` maps with the
//! same semantics the remote store gives us: per-document writes,
//! last-write-wins, and multi-document operations grouped under a single
//! collection lock where the workflow needs both-or-neither behavior.

pub mod models;
pub mod repositories;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use shiftboard_core::types::DocId;

use crate::models::availability::{AvailabilityRequestDoc, EffectiveAvailabilityDoc};
use crate::models::config::AppConfigDoc;
use crate::models::shift::ShiftDoc;
use crate::models::shift_request::ShiftRequestDoc;
use crate::models::staff::StaffDoc;
use crate::models::timeoff::TimeOffDoc;

/// Shared handle to the document store, cloned into every handler.
pub type StoreHandle = Arc<Store>;

/// The full set of document collections.
#[derive(Default)]
pub struct Store {
    pub(crate) staff: RwLock<HashMap<DocId, StaffDoc>>,
    pub(crate) shifts: RwLock<HashMap<DocId, ShiftDoc>>,
    pub(crate) shift_requests: RwLock<HashMap<DocId, ShiftRequestDoc>>,
    pub(crate) timeoff_requests: RwLock<HashMap<DocId, TimeOffDoc>>,
    pub(crate) availability_requests: RwLock<HashMap<DocId, AvailabilityRequestDoc>>,
    /// Keyed by employee uid: at most one effective record per employee.
    pub(crate) availability_effective: RwLock<HashMap<String, EffectiveAvailabilityDoc>>,
    /// Single well-known configuration document.
    pub(crate) app_config: RwLock<Option<AppConfigDoc>>,
}

/// Create an empty store behind a shared handle.
pub fn create_store() -> StoreHandle {
    Arc::new(Store::default())
}

/// Generate a fresh document id.
pub(crate) fn new_doc_id() -> DocId {
    uuid::Uuid::new_v4().to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document not found: {collection}/{id}")]
    NotFound {
        collection: &'static str,
        id: DocId,
    },

    #[error("Conflict: {0}")]
    Conflict(String),
}
