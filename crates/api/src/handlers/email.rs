//! The notification endpoint.
//!
//! Speaks the external `{action, payload}` contract rather than the
//! `{data}` envelope the rest of the API uses: success is `{ok: true}`
//! with a `notified` count, failure is `{ok: false, error}`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

use crate::middleware::auth::AuthUser;
use crate::notifications::{self, EmailAction, NotifyError};
use crate::state::AppState;

/// POST /api/v1/email
///
/// Synchronous send on behalf of an authenticated caller. Unknown or
/// malformed actions are a 400; configuration and delivery failures a
/// 500, both in the `{ok: false}` shape.
pub async fn send_email(
    user: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let action: EmailAction = match serde_json::from_value(body) {
        Ok(action) => action,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected email request with unknown action");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "ok": false, "error": "Unknown action" })),
            );
        }
    };

    let tag = action.tag();
    match notifications::dispatch(&state.store, state.mailer.as_ref(), action).await {
        Ok(outcome) => {
            tracing::info!(action = tag, caller = %user.email, notified = outcome.notified, "Email dispatched");
            (
                StatusCode::OK,
                Json(json!({ "ok": true, "notified": outcome.notified })),
            )
        }
        Err(NotifyError::Payload(message)) => {
            tracing::warn!(action = tag, error = %message, "Email payload rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "ok": false, "error": message })),
            )
        }
        Err(err) => {
            tracing::error!(action = tag, error = %err, "Email dispatch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": err.to_string() })),
            )
        }
    }
}
