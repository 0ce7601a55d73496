//! Handlers for the central configuration record.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use shiftboard_core::error::CoreError;
use shiftboard_core::staff::normalize_email;
use shiftboard_store::models::config::AppConfigDoc;
use shiftboard_store::repositories::ConfigRepo;

use crate::error::AppResult;
use crate::handlers::require_manager;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/config
pub async fn get_config(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    require_manager(&state, &user).await?;
    let config = ConfigRepo::get(&state.store).await.unwrap_or_default();
    Ok(Json(DataResponse { data: config }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateConfigBody {
    pub app_url: String,
    pub manager_email: String,
}

/// PUT /api/v1/config
///
/// Full replacement of the record. Bootstrap case: while no manager email
/// is configured yet, any authenticated caller may write it; afterwards
/// only the manager can.
pub async fn update_config(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateConfigBody>,
) -> AppResult<impl IntoResponse> {
    let current = ConfigRepo::get(&state.store).await.unwrap_or_default();
    if !current.manager_email.trim().is_empty() {
        require_manager(&state, &user).await?;
    }

    let manager_email = normalize_email(&input.manager_email);
    if manager_email.is_empty() {
        return Err(CoreError::Validation("manager_email must not be empty".into()).into());
    }

    let config = AppConfigDoc {
        app_url: input.app_url.trim().trim_end_matches('/').to_string(),
        manager_email,
    };
    ConfigRepo::set(&state.store, config.clone()).await;
    tracing::info!(manager_email = %config.manager_email, "Application config updated");
    Ok(Json(DataResponse { data: config }))
}
