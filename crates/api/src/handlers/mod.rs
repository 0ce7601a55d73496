//! Request handlers, one module per resource, plus shared identity
//! helpers.

pub mod app_config;
pub mod availability;
pub mod email;
pub mod session;
pub mod shift_requests;
pub mod shifts;
pub mod staff;
pub mod timeoff;

use shiftboard_core::error::CoreError;
use shiftboard_core::staff::normalize_email;
use shiftboard_core::types::Assignee;
use shiftboard_store::models::staff::StaffDoc;
use shiftboard_store::repositories::{ConfigRepo, StaffRepo};
use shiftboard_store::Store;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// The configured manager email: config record first, `MANAGER_EMAIL` env
/// fallback, normalized. Empty when neither is set.
pub(crate) async fn configured_manager_email(store: &Store) -> String {
    let doc = ConfigRepo::get(store).await.unwrap_or_default();
    let email = if doc.manager_email.trim().is_empty() {
        std::env::var("MANAGER_EMAIL").unwrap_or_default()
    } else {
        doc.manager_email
    };
    normalize_email(&email)
}

/// Gate a manager-only operation. Manager rights belong to whoever signs
/// in with the configured manager address; there is no role claim in the
/// token.
pub(crate) async fn require_manager(state: &AppState, user: &AuthUser) -> AppResult<String> {
    let manager = configured_manager_email(&state.store).await;
    if manager.is_empty() {
        return Err(CoreError::Forbidden("No manager is configured".into()).into());
    }
    if user.email != manager {
        return Err(CoreError::Forbidden("Manager access required".into()).into());
    }
    Ok(manager)
}

/// The staff directory entry bound to this account: by claim first, then
/// by email.
pub(crate) async fn resolve_staff(store: &Store, user: &AuthUser) -> Option<StaffDoc> {
    if let Some(staff) = StaffRepo::find_by_claim_uid(store, &user.uid).await {
        return Some(staff);
    }
    StaffRepo::find_by_email(store, &user.email).await
}

/// The identity the workflows stamp onto documents for this account.
/// Prefers the directory name over the token's, and falls back to the
/// email's local part when neither exists.
pub(crate) async fn identity_of(store: &Store, user: &AuthUser) -> Assignee {
    let staff = resolve_staff(store, user).await;
    let name = staff
        .map(|s| s.name)
        .or_else(|| user.name.clone())
        .unwrap_or_else(|| {
            user.email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
        });
    Assignee {
        uid: user.uid.clone(),
        name,
        email: user.email.clone(),
    }
}
