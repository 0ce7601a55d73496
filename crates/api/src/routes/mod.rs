pub mod availability;
pub mod config;
pub mod email;
pub mod health;
pub mod session;
pub mod shift_requests;
pub mod shifts;
pub mod staff;
pub mod timeoff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /session                                 who am I (role, bound staff entry)
///
/// /staff                                   list, create
/// /staff/{id}                              delete
/// /staff/{id}/email                        set email (PUT)
/// /staff/{id}/claim                        bind account to entry (POST)
///
/// /shifts                                  list week, create draft
/// /shifts/{id}                             delete draft
/// /shifts/publish                          publish-replace a week (POST)
/// /shifts/duplicate                        seed week from previous (POST)
///
/// /shift-requests                          list, create (TAKE / SWAP)
/// /shift-requests/{id}/target-decision     target accepts or rejects (POST)
/// /shift-requests/{id}/manager-decision    manager approves or rejects (POST)
/// /shift-requests/{id}/cancel              requester withdraws (POST)
///
/// /timeoff                                 list, create
/// /timeoff/{id}/decide                     manager decision (POST)
/// /timeoff/{id}/cancel                     owner withdraws (POST)
///
/// /availability                            list, propose pattern
/// /availability/effective/{uid}            authoritative pattern (GET)
/// /availability/{id}/approve               manager approves (POST)
/// /availability/{id}/reject                manager rejects (POST)
/// /availability/{id}/cancel                owner withdraws (POST)
///
/// /email                                   synchronous notification send (POST)
///
/// /config                                  central configuration record (GET, PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Identity resolution for the signed-in account.
        .nest("/session", session::router())
        // Staff directory.
        .nest("/staff", staff::router())
        // Shift drafts and the weekly publish cycle.
        .nest("/shifts", shifts::router())
        // TAKE / SWAP approval workflow.
        .nest("/shift-requests", shift_requests::router())
        // Time-off workflow.
        .nest("/timeoff", timeoff::router())
        // Availability proposals and effective patterns.
        .nest("/availability", availability::router())
        // External {action, payload} notification contract.
        .nest("/email", email::router())
        // app_url / manager_email record.
        .nest("/config", config::router())
}
