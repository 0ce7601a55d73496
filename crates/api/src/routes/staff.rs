//! Route definitions for the `/staff` resource.
//!
//! Listing and claiming are open to any authenticated caller; directory
//! mutations are manager-only (enforced in the handlers).

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::staff;
use crate::state::AppState;

/// Routes mounted at `/staff`.
///
/// ```text
/// GET    /            -> list_staff (?area=FRONT|BACK)
/// POST   /            -> create_staff
/// PUT    /{id}/email  -> set_staff_email
/// POST   /{id}/claim  -> claim_staff
/// DELETE /{id}        -> delete_staff
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(staff::list_staff).post(staff::create_staff))
        .route("/{id}", axum::routing::delete(staff::delete_staff))
        .route("/{id}/email", put(staff::set_staff_email))
        .route("/{id}/claim", post(staff::claim_staff))
}
