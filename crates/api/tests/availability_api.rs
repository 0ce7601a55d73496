//! HTTP-level integration tests for the availability workflow: proposals,
//! approval into the effective record, and the replace-not-merge rule.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth};

async fn propose(
    t: &common::TestApp,
    token: &str,
    days: serde_json::Value,
) -> (String, serde_json::Value) {
    let response = post_json_auth(
        t.app.clone(),
        "/api/v1/availability",
        token,
        serde_json::json!({ "proposed_days": days }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::CREATED).await;
    let id = json["data"]["id"].as_str().unwrap().to_string();
    (id, json)
}

async fn decide(t: &common::TestApp, id: &str, verb: &str) -> axum::http::StatusCode {
    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/availability/{id}/{verb}"),
        &t.manager_token(),
        serde_json::json!({}),
    )
    .await;
    response.status()
}

// ---------------------------------------------------------------------------
// Proposal
// ---------------------------------------------------------------------------

/// A proposal is stored with a derived summary and mailed to the manager.
#[tokio::test]
async fn proposal_is_summarized_and_mailed() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));

    let (_, json) = propose(
        &t,
        &ana,
        serde_json::json!({ "tue": "UNAVAILABLE", "sun": "UNAVAILABLE" }),
    )
    .await;

    assert_eq!(json["data"]["status"], "PENDING");
    assert_eq!(json["data"]["summary"], "Unavailable: Tue, Sun");
    assert_eq!(json["data"]["proposed_days"]["mon"], "OPEN");

    let sent = t.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to[0].email, common::MANAGER_EMAIL);
    assert!(sent[0].html.contains("Unavailable: Tue, Sun"));
}

/// With no record ever approved, the effective pattern is all-open.
#[tokio::test]
async fn effective_defaults_to_all_open() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));

    let response = get_auth(t.app, "/api/v1/availability/effective/ana-uid", &ana).await;
    let json = common::expect_json(response, StatusCode::OK).await;
    for day in ["mon", "tue", "wed", "thu", "fri", "sat", "sun"] {
        assert_eq!(json["data"]["days"][day], "OPEN");
    }
}

// ---------------------------------------------------------------------------
// Approval replaces the effective record
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approval_replaces_effective_wholesale() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));

    // First approved pattern: Monday off.
    let (first, _) = propose(&t, &ana, serde_json::json!({ "mon": "UNAVAILABLE" })).await;
    assert_eq!(decide(&t, &first, "approve").await, StatusCode::OK);

    let response = get_auth(
        t.app.clone(),
        "/api/v1/availability/effective/ana-uid",
        &ana,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["days"]["mon"], "UNAVAILABLE");

    // Second approved pattern says nothing about Monday: it re-opens.
    let (second, _) = propose(&t, &ana, serde_json::json!({ "sat": "UNAVAILABLE" })).await;
    assert_eq!(decide(&t, &second, "approve").await, StatusCode::OK);

    let response = get_auth(t.app, "/api/v1/availability/effective/ana-uid", &ana).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["days"]["mon"], "OPEN");
    assert_eq!(json["data"]["days"]["sat"], "UNAVAILABLE");

    // The employee got a decision email for each approval.
    let sent = t.mailer.sent().await;
    let to_ana = sent
        .iter()
        .filter(|m| m.to.iter().any(|r| r.email == "ana@example.com"))
        .count();
    assert_eq!(to_ana, 2);
}

/// Rejection notifies the employee but leaves the effective record alone.
#[tokio::test]
async fn rejection_leaves_effective_untouched() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));

    let (first, _) = propose(&t, &ana, serde_json::json!({ "mon": "UNAVAILABLE" })).await;
    assert_eq!(decide(&t, &first, "approve").await, StatusCode::OK);

    let (second, _) = propose(&t, &ana, serde_json::json!({ "fri": "UNAVAILABLE" })).await;
    assert_eq!(decide(&t, &second, "reject").await, StatusCode::OK);

    let response = get_auth(t.app, "/api/v1/availability/effective/ana-uid", &ana).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["days"]["mon"], "UNAVAILABLE");
    assert_eq!(json["data"]["days"]["fri"], "OPEN");
}

/// Decisions are terminal.
#[tokio::test]
async fn decided_proposals_reject_further_decisions() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));

    let (id, _) = propose(&t, &ana, serde_json::json!({ "mon": "UNAVAILABLE" })).await;
    assert_eq!(decide(&t, &id, "reject").await, StatusCode::OK);
    assert_eq!(decide(&t, &id, "approve").await, StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Authorization, cancel, listing
// ---------------------------------------------------------------------------

/// Employees cannot decide proposals.
#[tokio::test]
async fn decisions_are_manager_only() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));

    let (id, _) = propose(&t, &ana, serde_json::json!({})).await;

    let response = post_json_auth(
        t.app,
        &format!("/api/v1/availability/{id}/approve"),
        &ana,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// The owner withdraws a pending proposal; others cannot.
#[tokio::test]
async fn cancel_is_owner_only_and_pending_only() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));
    let bob = t.token("bob-uid", "bob@example.com", Some("Bob"));

    let (id, _) = propose(&t, &ana, serde_json::json!({ "wed": "UNAVAILABLE" })).await;

    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/availability/{id}/cancel"),
        &bob,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/availability/{id}/cancel"),
        &ana,
        serde_json::json!({}),
    )
    .await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "CANCELLED");

    assert_eq!(decide(&t, &id, "approve").await, StatusCode::CONFLICT);
}

/// Managers list the pending queue; employees their own history.
#[tokio::test]
async fn listing_scopes_by_role() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    let ana = t.token("ana-uid", "ana@example.com", Some("Ana"));
    let bob = t.token("bob-uid", "bob@example.com", Some("Bob"));

    let (decided, _) = propose(&t, &ana, serde_json::json!({ "mon": "UNAVAILABLE" })).await;
    assert_eq!(decide(&t, &decided, "approve").await, StatusCode::OK);
    propose(&t, &ana, serde_json::json!({ "tue": "UNAVAILABLE" })).await;
    propose(&t, &bob, serde_json::json!({ "wed": "UNAVAILABLE" })).await;

    // Manager: only the two still-pending proposals.
    let response = get_auth(t.app.clone(), "/api/v1/availability", &t.manager_token()).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    // Ana: her full history, decided included.
    let response = get_auth(t.app, "/api/v1/availability", &ana).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}
