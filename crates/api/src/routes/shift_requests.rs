//! Route definitions for the `/shift-requests` resource: the TAKE/SWAP
//! two-stage approval workflow.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::shift_requests;
use crate::state::AppState;

/// Routes mounted at `/shift-requests`.
///
/// ```text
/// GET    /                       -> list_requests
/// POST   /                       -> create_request
/// POST   /{id}/target-decision   -> target_decision
/// POST   /{id}/manager-decision  -> manager_decision
/// POST   /{id}/cancel            -> cancel_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(shift_requests::list_requests).post(shift_requests::create_request),
        )
        .route(
            "/{id}/target-decision",
            post(shift_requests::target_decision),
        )
        .route(
            "/{id}/manager-decision",
            post(shift_requests::manager_decision),
        )
        .route("/{id}/cancel", post(shift_requests::cancel_request))
}
