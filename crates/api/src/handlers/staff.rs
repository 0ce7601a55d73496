//! Handlers for the staff directory.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use shiftboard_core::staff::validate_name;
use shiftboard_core::types::Area;
use shiftboard_store::repositories::StaffRepo;

use crate::error::AppResult;
use crate::handlers::require_manager;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StaffListQuery {
    pub area: Option<Area>,
}

/// GET /api/v1/staff
///
/// The directory, optionally filtered by area. Any authenticated account
/// may read it (employees pick swap targets from it).
pub async fn list_staff(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<StaffListQuery>,
) -> AppResult<impl IntoResponse> {
    let staff = match query.area {
        Some(area) => StaffRepo::list_by_area(&state.store, area).await,
        None => StaffRepo::list(&state.store).await,
    };
    Ok(Json(DataResponse { data: staff }))
}

#[derive(Debug, Deserialize)]
pub struct CreateStaffRequest {
    pub name: String,
    pub area: Area,
}

/// POST /api/v1/staff
///
/// Manager creates an entry with name + area only; it stays unclaimed
/// until an employee account claims it.
pub async fn create_staff(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateStaffRequest>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;
    let name = validate_name(&input.name)?;

    let staff = StaffRepo::create(&state.store, &name, input.area).await;
    tracing::info!(staff_id = %staff.id, name = %staff.name, area = %staff.area, "Staff entry created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: staff })))
}

#[derive(Debug, Deserialize)]
pub struct SetEmailRequest {
    pub email: String,
}

/// PUT /api/v1/staff/{id}/email
pub async fn set_staff_email(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SetEmailRequest>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;
    let staff = StaffRepo::set_email(&state.store, &id, &input.email).await?;
    Ok(Json(DataResponse { data: staff }))
}

/// POST /api/v1/staff/{id}/claim
///
/// Bind the calling account to the entry, first-claim-wins. Claiming an
/// entry already owned by another account is a 409.
pub async fn claim_staff(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let staff = StaffRepo::claim(&state.store, &id, &user.uid, &user.email).await?;
    tracing::info!(staff_id = %staff.id, uid = %user.uid, "Staff entry claimed");
    Ok(Json(DataResponse { data: staff }))
}

/// DELETE /api/v1/staff/{id}
pub async fn delete_staff(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;
    StaffRepo::remove(&state.store, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
