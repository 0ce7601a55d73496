//! Route definitions for the `/timeoff` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::timeoff;
use crate::state::AppState;

/// Routes mounted at `/timeoff`.
///
/// ```text
/// GET    /              -> list_timeoff (?status=, manager only filter)
/// POST   /              -> create_timeoff
/// POST   /{id}/decide   -> decide_timeoff
/// POST   /{id}/cancel   -> cancel_timeoff
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(timeoff::list_timeoff).post(timeoff::create_timeoff))
        .route("/{id}/decide", post(timeoff::decide_timeoff))
        .route("/{id}/cancel", post(timeoff::cancel_timeoff))
}
