//! Route definitions for the `/availability` resource: weekly-pattern
//! proposals and the effective record.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::availability;
use crate::state::AppState;

/// Routes mounted at `/availability`.
///
/// ```text
/// GET    /                  -> list_availability
/// POST   /                  -> create_availability
/// GET    /effective/{uid}   -> get_effective
/// POST   /{id}/approve      -> approve_availability
/// POST   /{id}/reject       -> reject_availability
/// POST   /{id}/cancel       -> cancel_availability
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(availability::list_availability).post(availability::create_availability),
        )
        .route("/effective/{uid}", get(availability::get_effective))
        .route("/{id}/approve", post(availability::approve_availability))
        .route("/{id}/reject", post(availability::reject_availability))
        .route("/{id}/cancel", post(availability::cancel_availability))
}
