//! Route definitions for the `/shifts` resource: drafts, the publish
//! cycle, and week duplication.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::shifts;
use crate::state::AppState;

/// Routes mounted at `/shifts`.
///
/// ```text
/// GET    /            -> list_shifts (?week_start=&area=)
/// POST   /            -> create_shift
/// DELETE /{id}        -> delete_shift (drafts only)
/// POST   /publish     -> publish_week
/// POST   /duplicate   -> duplicate_week
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shifts::list_shifts).post(shifts::create_shift))
        .route("/{id}", delete(shifts::delete_shift))
        .route("/publish", post(shifts::publish_week))
        .route("/duplicate", post(shifts::duplicate_week))
}
