//! Route definitions for the central configuration record.

use axum::routing::get;
use axum::Router;

use crate::handlers::app_config;
use crate::state::AppState;

/// Routes mounted at `/config`.
///
/// ```text
/// GET    /   -> get_config (manager only)
/// PUT    /   -> update_config (manager only after bootstrap)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(app_config::get_config).put(app_config::update_config),
    )
}
