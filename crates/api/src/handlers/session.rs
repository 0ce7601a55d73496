//! Session resolution: binds the authenticated identity to a staff
//! directory entry and a role.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use shiftboard_store::models::staff::StaffDoc;

use crate::error::AppResult;
use crate::handlers::{configured_manager_email, resolve_staff};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Employee,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub uid: String,
    pub email: String,
    pub role: Role,
    /// The directory entry this account claims or matches by email, when
    /// one exists.
    pub staff: Option<StaffDoc>,
}

/// GET /api/v1/session
///
/// Who am I: identity, role, and the bound staff entry.
pub async fn get_session(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let manager = configured_manager_email(&state.store).await;
    let role = if !manager.is_empty() && user.email == manager {
        Role::Manager
    } else {
        Role::Employee
    };
    let staff = resolve_staff(&state.store, &user).await;

    Ok(Json(DataResponse {
        data: SessionInfo {
            uid: user.uid,
            email: user.email,
            role,
            staff,
        },
    }))
}
