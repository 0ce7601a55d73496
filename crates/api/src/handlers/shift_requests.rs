//! Handlers for the swap / take-over workflow: two-stage approval with
//! store mutations on final approval.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use shiftboard_core::error::CoreError;
use shiftboard_core::shift_request::{validate_create, RequestStatus, RequestType};
use shiftboard_core::types::DocId;
use shiftboard_store::models::shift_request::{CreateShiftRequest, ShiftRequestDoc};
use shiftboard_store::repositories::{ShiftRepo, ShiftRequestRepo};

use crate::error::AppResult;
use crate::handlers::{identity_of, require_manager};
use crate::middleware::auth::AuthUser;
use crate::notifications::{self, EmailAction};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequestBody {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub target_shift_id: DocId,
    /// The shift offered in return; required for SWAP.
    pub requester_shift_id: Option<DocId>,
    pub note: Option<String>,
}

/// POST /api/v1/shift-requests
///
/// Employee asks to take a coworker's shift or swap one of their own for
/// it. The target employee is notified and decides first.
pub async fn create_request(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRequestBody>,
) -> AppResult<impl IntoResponse> {
    let target_shift = ShiftRepo::find_by_id(&state.store, &input.target_shift_id)
        .await
        .ok_or_else(|| CoreError::NotFound {
            entity: "Shift",
            id: input.target_shift_id.clone(),
        })?;

    let requester = identity_of(&state.store, &user).await;
    validate_create(
        input.request_type,
        target_shift.assignee.has_email(),
        target_shift.assignee.is_identity(&user.uid, &user.email),
        input.requester_shift_id.as_deref(),
    )?;

    if input.request_type == RequestType::Swap {
        // validate_create has already required an offered shift for swaps.
        let Some(offered_id) = input.requester_shift_id.as_deref() else {
            return Err(CoreError::Internal("Swap request without an offered shift".into()).into());
        };
        let offered = ShiftRepo::find_by_id(&state.store, offered_id)
            .await
            .ok_or_else(|| CoreError::NotFound {
                entity: "Shift",
                id: offered_id.to_string(),
            })?;
        if !offered.assignee.is_identity(&user.uid, &user.email) {
            return Err(CoreError::Validation(
                "The offered shift is not assigned to you".into(),
            )
            .into());
        }
    }

    let request = ShiftRequestRepo::create(
        &state.store,
        CreateShiftRequest {
            request_type: input.request_type,
            week_start: target_shift.week_start,
            area: target_shift.area,
            requester: requester.clone(),
            target: target_shift.assignee.clone(),
            target_shift_id: input.target_shift_id,
            requester_shift_id: input.requester_shift_id,
            note: input.note,
        },
    )
    .await;
    tracing::info!(
        request_id = %request.id,
        request_type = ?request.request_type,
        target_shift = %request.target_shift_id,
        "Shift request created"
    );

    notifications::notify_best_effort(
        &state.store,
        state.mailer.as_ref(),
        EmailAction::SwapRequested {
            target_email: request.target.email.clone(),
            target_name: request.target.name.clone(),
            requester_name: requester.name,
            requester_email: requester.email,
            request_type: request.request_type,
            note: request.note.clone(),
        },
    )
    .await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /api/v1/shift-requests
///
/// Managers see every request; employees only those they are part of.
pub async fn list_requests(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = if require_manager(&state, &user).await.is_ok() {
        ShiftRequestRepo::list_all(&state.store).await
    } else {
        ShiftRequestRepo::list_for_identity(&state.store, &user.uid, &user.email).await
    };
    Ok(Json(DataResponse { data: requests }))
}

async fn fetch_request(state: &AppState, id: &str) -> AppResult<ShiftRequestDoc> {
    ShiftRequestRepo::find_by_id(&state.store, id)
        .await
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "ShiftRequest",
                id: id.to_string(),
            }
            .into()
        })
}

#[derive(Debug, Deserialize)]
pub struct TargetDecisionBody {
    pub accept: bool,
}

/// POST /api/v1/shift-requests/{id}/target-decision
///
/// The shift's owner accepts (forwarding the request to the manager) or
/// rejects. Only valid while the request awaits the target.
pub async fn target_decision(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<TargetDecisionBody>,
) -> AppResult<impl IntoResponse> {
    let request = fetch_request(&state, &id).await?;
    if !request.target.is_identity(&user.uid, &user.email) {
        return Err(CoreError::Forbidden("Only the target employee may decide".into()).into());
    }

    let next = if input.accept {
        RequestStatus::PendingManager
    } else {
        RequestStatus::RejectedByTarget
    };
    request.status.validate_transition(next)?;

    let updated = ShiftRequestRepo::set_status(&state.store, &id, next).await?;
    tracing::info!(request_id = %id, status = ?next, "Target decided shift request");

    if input.accept {
        notifications::notify_best_effort(
            &state.store,
            state.mailer.as_ref(),
            EmailAction::SwapNeedsManager {
                requester_name: updated.requester.name.clone(),
                requester_email: updated.requester.email.clone(),
                target_name: updated.target.name.clone(),
                target_email: updated.target.email.clone(),
                manager_email: None,
            },
        )
        .await;
    }

    Ok(Json(DataResponse { data: updated }))
}

#[derive(Debug, Deserialize)]
pub struct ManagerDecisionBody {
    pub approve: bool,
}

/// POST /api/v1/shift-requests/{id}/manager-decision
///
/// Final approval. On approve the referenced shifts must still exist and
/// be published; a TAKE reassigns the target shift to the requester, a
/// SWAP exchanges the two assignments as one unit (both or neither). Any
/// failure leaves the request and the shifts untouched.
pub async fn manager_decision(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ManagerDecisionBody>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;
    let request = fetch_request(&state, &id).await?;

    let next = if input.approve {
        RequestStatus::ApprovedByManager
    } else {
        RequestStatus::RejectedByManager
    };
    request.status.validate_transition(next)?;

    if input.approve {
        match request.request_type {
            RequestType::Take => {
                ShiftRepo::reassign(
                    &state.store,
                    &request.target_shift_id,
                    request.requester.clone(),
                )
                .await?;
            }
            RequestType::Swap => {
                let offered_id = request.requester_shift_id.as_deref().ok_or_else(|| {
                    CoreError::Internal("Swap request without an offered shift".into())
                })?;
                ShiftRepo::swap_assignees(&state.store, &request.target_shift_id, offered_id)
                    .await?;
            }
        }
    }

    let updated = ShiftRequestRepo::set_status(&state.store, &id, next).await?;
    tracing::info!(request_id = %id, status = ?next, "Manager decided shift request");

    notifications::notify_best_effort(
        &state.store,
        state.mailer.as_ref(),
        EmailAction::SwapManagerDecision {
            requester_name: updated.requester.name.clone(),
            requester_email: updated.requester.email.clone(),
            target_name: updated.target.name.clone(),
            target_email: updated.target.email.clone(),
            status: next,
        },
    )
    .await;

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/shift-requests/{id}/cancel
///
/// The requester withdraws, only while the manager has not decided. No
/// notification goes out.
pub async fn cancel_request(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let request = fetch_request(&state, &id).await?;
    if !request.requester.is_identity(&user.uid, &user.email) {
        return Err(CoreError::Forbidden("Only the requester may cancel".into()).into());
    }
    request
        .status
        .validate_transition(RequestStatus::Cancelled)?;

    let updated = ShiftRequestRepo::set_status(&state.store, &id, RequestStatus::Cancelled).await?;
    tracing::info!(request_id = %id, "Shift request cancelled");
    Ok(Json(DataResponse { data: updated }))
}
