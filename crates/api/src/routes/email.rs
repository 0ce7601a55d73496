//! Route definition for the notification endpoint.

use axum::routing::post;
use axum::Router;

use crate::handlers::email;
use crate::state::AppState;

/// Routes mounted at `/email`.
///
/// ```text
/// POST   /   -> send_email ({action, payload} contract)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(email::send_email))
}
