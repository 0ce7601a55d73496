//! Handlers for the availability workflow: weekly-pattern proposals and
//! the per-employee effective record.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use shiftboard_core::availability::{AvailabilityStatus, WeekPattern};
use shiftboard_core::error::CoreError;
use shiftboard_store::models::availability::{AvailabilityRequestDoc, CreateAvailabilityRequest};
use shiftboard_store::repositories::AvailabilityRepo;

use crate::error::AppResult;
use crate::handlers::{configured_manager_email, identity_of, require_manager};
use crate::middleware::auth::AuthUser;
use crate::notifications::{self, EmailAction};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAvailabilityBody {
    pub proposed_days: WeekPattern,
}

/// POST /api/v1/availability
///
/// Employee proposes a new weekly pattern. The proposal is stored with a
/// human-readable summary and the manager is asked to decide.
pub async fn create_availability(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAvailabilityBody>,
) -> AppResult<impl IntoResponse> {
    let identity = identity_of(&state.store, &user).await;
    let manager_email = configured_manager_email(&state.store).await;

    let request = AvailabilityRepo::create(
        &state.store,
        CreateAvailabilityRequest {
            uid: identity.uid,
            employee_name: identity.name.clone(),
            employee_email: identity.email.clone(),
            manager_email: manager_email.clone(),
            proposed_days: input.proposed_days,
        },
    )
    .await;
    tracing::info!(request_id = %request.id, summary = %request.summary, "Availability request created");

    notifications::notify_best_effort(
        &state.store,
        state.mailer.as_ref(),
        EmailAction::AvailabilityPending {
            employee_name: identity.name,
            employee_email: identity.email,
            summary: request.summary.clone(),
            manager_email: Some(manager_email),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/availability
///
/// Managers see the pending queue; employees their own proposals.
pub async fn list_availability(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = if require_manager(&state, &user).await.is_ok() {
        AvailabilityRepo::list_pending(&state.store).await
    } else {
        AvailabilityRepo::list_for_uid(&state.store, &user.uid).await
    };
    Ok(Json(DataResponse { data: requests }))
}

#[derive(Debug, Serialize)]
pub struct EffectiveView {
    pub uid: String,
    pub days: WeekPattern,
}

/// GET /api/v1/availability/effective/{uid}
///
/// The authoritative pattern for an employee; all days open when no
/// record was ever approved.
pub async fn get_effective(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(uid): Path<String>,
) -> AppResult<impl IntoResponse> {
    let days = AvailabilityRepo::effective_for(&state.store, &uid)
        .await
        .map(|doc| doc.days)
        .unwrap_or_default();
    Ok(Json(DataResponse {
        data: EffectiveView { uid, days },
    }))
}

async fn fetch_availability(state: &AppState, id: &str) -> AppResult<AvailabilityRequestDoc> {
    AvailabilityRepo::find_by_id(&state.store, id)
        .await
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "AvailabilityRequest",
                id: id.to_string(),
            }
            .into()
        })
}

async fn decide(
    state: &AppState,
    id: &str,
    manager: String,
    approve: bool,
) -> AppResult<AvailabilityRequestDoc> {
    let request = fetch_availability(state, id).await?;
    let next = if approve {
        AvailabilityStatus::Approved
    } else {
        AvailabilityStatus::Rejected
    };
    request.status.validate_transition(next)?;

    if approve {
        // Replacement, not a merge: the proposal becomes the whole record.
        AvailabilityRepo::set_effective(&state.store, &request.uid, request.proposed_days, &manager)
            .await;
    }
    let updated = AvailabilityRepo::set_status(&state.store, id, next, Some(manager)).await?;
    tracing::info!(request_id = %id, status = ?next, "Availability request decided");

    notifications::notify_best_effort(
        &state.store,
        state.mailer.as_ref(),
        EmailAction::AvailabilityDecision {
            employee_name: updated.employee_name.clone(),
            employee_email: updated.employee_email.clone(),
            status: next,
            summary: updated.summary.clone(),
        },
    )
    .await;

    Ok(updated)
}

/// POST /api/v1/availability/{id}/approve
pub async fn approve_availability(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let manager = require_manager(&state, &user).await?;
    let updated = decide(&state, &id, manager, true).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/availability/{id}/reject
pub async fn reject_availability(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let manager = require_manager(&state, &user).await?;
    let updated = decide(&state, &id, manager, false).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/availability/{id}/cancel
///
/// The owner withdraws a still-pending proposal; the effective record is
/// untouched.
pub async fn cancel_availability(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let request = fetch_availability(&state, &id).await?;
    if request.uid != user.uid {
        return Err(CoreError::Forbidden("Only the requesting employee may cancel".into()).into());
    }
    request
        .status
        .validate_transition(AvailabilityStatus::Cancelled)?;

    let updated =
        AvailabilityRepo::set_status(&state.store, &id, AvailabilityStatus::Cancelled, None).await?;
    tracing::info!(request_id = %id, "Availability request cancelled");
    Ok(Json(DataResponse { data: updated }))
}
