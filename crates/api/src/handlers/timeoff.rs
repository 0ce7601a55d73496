//! Handlers for the time-off workflow.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use shiftboard_core::error::CoreError;
use shiftboard_core::timeoff::{validate_notice, TimeOffStatus, TimeOffType};
use shiftboard_store::models::timeoff::{CreateTimeOff, TimeOffDoc};
use shiftboard_store::repositories::TimeOffRepo;

use crate::error::AppResult;
use crate::handlers::{identity_of, require_manager};
use crate::middleware::auth::AuthUser;
use crate::notifications::{self, EmailAction};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTimeOffBody {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub time_off_type: TimeOffType,
    pub note: Option<String>,
}

/// POST /api/v1/timeoff
///
/// Employee requests a day (or half-day) off, subject to the configured
/// minimum advance notice. The manager is notified.
pub async fn create_timeoff(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTimeOffBody>,
) -> AppResult<impl IntoResponse> {
    let today = chrono::Utc::now().date_naive();
    validate_notice(input.date, today, state.config.timeoff_min_notice_days)?;

    let identity = identity_of(&state.store, &user).await;
    let request = TimeOffRepo::create(
        &state.store,
        CreateTimeOff {
            uid: identity.uid,
            employee_name: identity.name.clone(),
            employee_email: identity.email.clone(),
            date: input.date,
            time_off_type: input.time_off_type,
            note: input.note,
        },
    )
    .await;
    tracing::info!(request_id = %request.id, date = %request.date, "Time-off request created");

    notifications::notify_best_effort(
        &state.store,
        state.mailer.as_ref(),
        EmailAction::TimeoffPending {
            employee_name: identity.name,
            employee_email: identity.email,
            date: request.date,
            time_off_type: request.time_off_type,
            note: request.note.clone(),
            manager_email: None,
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

#[derive(Debug, Deserialize)]
pub struct TimeOffListQuery {
    pub status: Option<TimeOffStatus>,
}

/// GET /api/v1/timeoff
///
/// Managers see every request (optionally by status); employees their own.
pub async fn list_timeoff(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<TimeOffListQuery>,
) -> AppResult<impl IntoResponse> {
    let requests = if require_manager(&state, &user).await.is_ok() {
        TimeOffRepo::list(&state.store, query.status).await
    } else {
        TimeOffRepo::list_for_uid(&state.store, &user.uid).await
    };
    Ok(Json(DataResponse { data: requests }))
}

async fn fetch_timeoff(state: &AppState, id: &str) -> AppResult<TimeOffDoc> {
    TimeOffRepo::find_by_id(&state.store, id)
        .await
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "TimeOffRequest",
                id: id.to_string(),
            }
            .into()
        })
}

#[derive(Debug, Deserialize)]
pub struct DecideBody {
    pub approve: bool,
}

/// POST /api/v1/timeoff/{id}/decide
///
/// Manager approves or rejects a pending request; the employee is
/// notified of the outcome.
pub async fn decide_timeoff(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<DecideBody>,
) -> AppResult<impl IntoResponse> {
    let manager = require_manager(&state, &user).await?;
    let request = fetch_timeoff(&state, &id).await?;

    let next = if input.approve {
        TimeOffStatus::Approved
    } else {
        TimeOffStatus::Rejected
    };
    request.status.validate_transition(next)?;

    let updated = TimeOffRepo::set_status(&state.store, &id, next, Some(manager)).await?;
    tracing::info!(request_id = %id, status = ?next, "Time-off request decided");

    notifications::notify_best_effort(
        &state.store,
        state.mailer.as_ref(),
        EmailAction::TimeoffDecision {
            employee_name: updated.employee_name.clone(),
            employee_email: updated.employee_email.clone(),
            status: next,
            date: updated.date,
            time_off_type: updated.time_off_type,
            note: updated.note.clone(),
        },
    )
    .await;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/timeoff/{id}/cancel
///
/// The owner withdraws a still-pending request. No notification.
pub async fn cancel_timeoff(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let request = fetch_timeoff(&state, &id).await?;
    if request.uid != user.uid {
        return Err(CoreError::Forbidden("Only the requesting employee may cancel".into()).into());
    }
    request
        .status
        .validate_transition(TimeOffStatus::Cancelled)?;

    let updated = TimeOffRepo::set_status(&state.store, &id, TimeOffStatus::Cancelled, None).await?;
    tracing::info!(request_id = %id, "Time-off request cancelled");
    Ok(Json(DataResponse { data: updated }))
}
