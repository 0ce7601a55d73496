//! Route definitions for the `/session` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/session`.
///
/// ```text
/// GET    /   -> get_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(session::get_session))
}
