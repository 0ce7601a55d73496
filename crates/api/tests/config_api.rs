//! HTTP-level integration tests for the central configuration record.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, put_json_auth};

/// While nothing is configured, any signed-in account may bootstrap the
/// record; afterwards only the manager can change it.
#[tokio::test]
async fn config_bootstrap_then_manager_only() {
    let t = common::spawn_app().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));

    // Bootstrap write by a plain account.
    let response = put_json_auth(
        t.app.clone(),
        "/api/v1/config",
        &ana,
        serde_json::json!({
            "app_url": "https://shiftboard.example.com/",
            "manager_email": common::MANAGER_EMAIL,
        }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(
        json["data"]["app_url"], "https://shiftboard.example.com",
        "trailing slash is stripped"
    );
    assert_eq!(json["data"]["manager_email"], common::MANAGER_EMAIL);

    // Now Ana is locked out of further writes and of reads.
    let response = put_json_auth(
        t.app.clone(),
        "/api/v1/config",
        &ana,
        serde_json::json!({ "app_url": "https://elsewhere.example.com", "manager_email": "ana@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(t.app.clone(), "/api/v1/config", &ana).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The manager can read and update.
    let response = get_auth(t.app.clone(), "/api/v1/config", &t.manager_token()).await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["manager_email"], common::MANAGER_EMAIL);

    let manager = t.manager_token();
    let response = put_json_auth(
        t.app,
        "/api/v1/config",
        &manager,
        serde_json::json!({
            "app_url": "https://shiftboard.example.com",
            "manager_email": "newmanager@example.com",
        }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["manager_email"], "newmanager@example.com");
}

/// The manager email may never be blanked.
#[tokio::test]
async fn config_rejects_empty_manager_email() {
    let t = common::spawn_app().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));

    let response = put_json_auth(
        t.app,
        "/api/v1/config",
        &ana,
        serde_json::json!({ "app_url": "https://shiftboard.example.com", "manager_email": "  " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
