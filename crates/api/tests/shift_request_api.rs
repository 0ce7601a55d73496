//! HTTP-level integration tests for the swap / take-over workflow:
//! two-stage approval, store mutations on final approval, and the
//! both-or-neither guarantee for swaps.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, TestApp};
use shiftboard_core::types::Area;
use shiftboard_store::repositories::StaffRepo;

const WEEK: &str = "2026-10-05";

struct Person {
    uid: &'static str,
    email: &'static str,
    name: &'static str,
}

const ANA: Person = Person {
    uid: "ana-uid",
    email: "ana@example.com",
    name: "Ana",
};
const BOB: Person = Person {
    uid: "bob-uid",
    email: "bob@example.com",
    name: "Bob",
};

impl TestApp {
    async fn seed_person(&self, p: &Person) {
        let staff = StaffRepo::create(&self.store, p.name, Area::Front).await;
        StaffRepo::claim(&self.store, &staff.id, p.uid, p.email)
            .await
            .unwrap();
    }

    /// Create a draft for the person's directory entry and return the
    /// shift id. Drafts become published via the publish endpoint.
    async fn seed_shift(&self, p: &Person, date: &str) -> String {
        let staff = StaffRepo::find_by_claim_uid(&self.store, p.uid)
            .await
            .expect("person must be seeded first");
        let response = post_json_auth(
            self.app.clone(),
            "/api/v1/shifts",
            &self.manager_token(),
            serde_json::json!({
                "date": date,
                "start": "09:00:00",
                "end": "17:00:00",
                "area": "FRONT",
                "role": "Server",
                "staff_id": staff.id,
            }),
        )
        .await;
        let json = common::expect_json(response, StatusCode::CREATED).await;
        json["data"]["shift"]["id"].as_str().unwrap().to_string()
    }

    async fn publish(&self) {
        let response = post_json_auth(
            self.app.clone(),
            "/api/v1/shifts/publish",
            &self.manager_token(),
            serde_json::json!({ "week_start": WEEK, "area": "FRONT" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn shift_assignee_uid(&self, id: &str) -> String {
        shiftboard_store::repositories::ShiftRepo::find_by_id(&self.store, id)
            .await
            .unwrap()
            .assignee
            .uid
    }

    fn person_token(&self, p: &Person) -> String {
        self.token(p.uid, p.email, Some(p.name))
    }
}

// ---------------------------------------------------------------------------
// TAKE: full happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn take_request_runs_both_approval_stages() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;
    t.seed_person(&BOB).await;
    let bobs_shift = t.seed_shift(&BOB, "2026-10-07").await;
    t.publish().await;

    // Ana asks to take Bob's shift; Bob is notified.
    let response = post_json_auth(
        t.app.clone(),
        "/api/v1/shift-requests",
        &t.person_token(&ANA),
        serde_json::json!({ "type": "TAKE", "target_shift_id": bobs_shift }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["status"], "PENDING_TARGET");
    assert_eq!(json["data"]["type"], "TAKE");
    let request_id = json["data"]["id"].as_str().unwrap().to_string();

    let sent = t.mailer.sent().await;
    assert!(sent
        .iter()
        .any(|m| m.to.iter().any(|r| r.email == BOB.email)));

    // Bob accepts; the request moves to the manager, who is notified.
    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/target-decision"),
        &t.person_token(&BOB),
        serde_json::json!({ "accept": true }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "PENDING_MANAGER");

    let sent = t.mailer.sent().await;
    assert!(sent
        .iter()
        .any(|m| m.to.iter().any(|r| r.email == common::MANAGER_EMAIL)));

    // Manager approves; the shift changes hands.
    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/manager-decision"),
        &t.manager_token(),
        serde_json::json!({ "approve": true }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "APPROVED_BY_MANAGER");

    assert_eq!(t.shift_assignee_uid(&bobs_shift).await, ANA.uid);

    // Both parties get the decision email.
    let decision = t.mailer.sent().await.into_iter().last().unwrap();
    let recipients: Vec<_> = decision.to.iter().map(|r| r.email.clone()).collect();
    assert!(recipients.contains(&ANA.email.to_string()));
    assert!(recipients.contains(&BOB.email.to_string()));
}

// ---------------------------------------------------------------------------
// SWAP: both-or-neither
// ---------------------------------------------------------------------------

#[tokio::test]
async fn approved_swap_exchanges_both_assignments() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;
    t.seed_person(&BOB).await;
    let anas_shift = t.seed_shift(&ANA, "2026-10-06").await;
    let bobs_shift = t.seed_shift(&BOB, "2026-10-07").await;
    t.publish().await;

    let response = post_json_auth(
        t.app.clone(),
        "/api/v1/shift-requests",
        &t.person_token(&ANA),
        serde_json::json!({
            "type": "SWAP",
            "target_shift_id": bobs_shift,
            "requester_shift_id": anas_shift,
        }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::CREATED).await;
    let request_id = json["data"]["id"].as_str().unwrap().to_string();

    post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/target-decision"),
        &t.person_token(&BOB),
        serde_json::json!({ "accept": true }),
    )
    .await;
    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/manager-decision"),
        &t.manager_token(),
        serde_json::json!({ "approve": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(t.shift_assignee_uid(&bobs_shift).await, ANA.uid);
    assert_eq!(t.shift_assignee_uid(&anas_shift).await, BOB.uid);
}

/// When the offered shift is no longer published at approval time, the
/// approval fails and neither assignment moves.
#[tokio::test]
async fn swap_approval_fails_without_touching_either_shift() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;
    t.seed_person(&BOB).await;
    let anas_shift = t.seed_shift(&ANA, "2026-10-06").await;
    let bobs_shift = t.seed_shift(&BOB, "2026-10-07").await;
    t.publish().await;

    let response = post_json_auth(
        t.app.clone(),
        "/api/v1/shift-requests",
        &t.person_token(&ANA),
        serde_json::json!({
            "type": "SWAP",
            "target_shift_id": bobs_shift,
            "requester_shift_id": anas_shift,
        }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::CREATED).await;
    let request_id = json["data"]["id"].as_str().unwrap().to_string();

    post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/target-decision"),
        &t.person_token(&BOB),
        serde_json::json!({ "accept": true }),
    )
    .await;

    // A re-publish replaces the week, so the referenced shifts are gone.
    t.seed_shift(&BOB, "2026-10-09").await;
    t.publish().await;

    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/manager-decision"),
        &t.manager_token(),
        serde_json::json!({ "approve": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The request is still awaiting the manager; nothing was half-applied.
    let response = get_auth(
        t.app.clone(),
        "/api/v1/shift-requests",
        &t.manager_token(),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["status"], "PENDING_MANAGER");
}

// ---------------------------------------------------------------------------
// Creation validation
// ---------------------------------------------------------------------------

/// A target without a mailbox can never be asked.
#[tokio::test]
async fn request_against_unassigned_shift_is_rejected() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;

    let response = post_json_auth(
        t.app.clone(),
        "/api/v1/shifts",
        &t.manager_token(),
        serde_json::json!({
            "date": "2026-10-07",
            "start": "09:00:00",
            "end": "17:00:00",
            "area": "FRONT",
            "role": "Server",
            "assignee_name": "Walk-in Cover",
        }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::CREATED).await;
    let shift_id = json["data"]["shift"]["id"].as_str().unwrap().to_string();
    t.publish().await;

    let ana = t.person_token(&ANA);
    let response = post_json_auth(
        t.app,
        "/api/v1/shift-requests",
        &ana,
        serde_json::json!({ "type": "TAKE", "target_shift_id": shift_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// SWAP must offer one of the requester's own shifts.
#[tokio::test]
async fn swap_must_offer_own_shift() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;
    t.seed_person(&BOB).await;
    let bobs_shift = t.seed_shift(&BOB, "2026-10-07").await;
    let bobs_other = t.seed_shift(&BOB, "2026-10-08").await;
    t.publish().await;

    // No offered shift at all.
    let response = post_json_auth(
        t.app.clone(),
        "/api/v1/shift-requests",
        &t.person_token(&ANA),
        serde_json::json!({ "type": "SWAP", "target_shift_id": bobs_shift }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Offering somebody else's shift.
    let ana = t.person_token(&ANA);
    let response = post_json_auth(
        t.app,
        "/api/v1/shift-requests",
        &ana,
        serde_json::json!({
            "type": "SWAP",
            "target_shift_id": bobs_shift,
            "requester_shift_id": bobs_other,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Asking for your own shift is meaningless.
#[tokio::test]
async fn cannot_request_own_shift() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;
    let anas_shift = t.seed_shift(&ANA, "2026-10-06").await;
    t.publish().await;

    let ana = t.person_token(&ANA);
    let response = post_json_auth(
        t.app,
        "/api/v1/shift-requests",
        &ana,
        serde_json::json!({ "type": "TAKE", "target_shift_id": anas_shift }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Authorization and cancel rules
// ---------------------------------------------------------------------------

/// Only the target answers the target stage; only the requester cancels.
#[tokio::test]
async fn stage_actions_are_identity_bound() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;
    t.seed_person(&BOB).await;
    let bobs_shift = t.seed_shift(&BOB, "2026-10-07").await;
    t.publish().await;

    let response = post_json_auth(
        t.app.clone(),
        "/api/v1/shift-requests",
        &t.person_token(&ANA),
        serde_json::json!({ "type": "TAKE", "target_shift_id": bobs_shift }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::CREATED).await;
    let request_id = json["data"]["id"].as_str().unwrap().to_string();

    // Ana cannot answer her own request's target stage.
    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/target-decision"),
        &t.person_token(&ANA),
        serde_json::json!({ "accept": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Bob cannot cancel Ana's request.
    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/cancel"),
        &t.person_token(&BOB),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Ana can.
    let ana = t.person_token(&ANA);
    let response = post_json_auth(
        t.app,
        &format!("/api/v1/shift-requests/{request_id}/cancel"),
        &ana,
        serde_json::json!({}),
    )
    .await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "CANCELLED");
}

/// Decided requests cannot be cancelled or re-decided.
#[tokio::test]
async fn terminal_requests_reject_further_actions() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;
    t.seed_person(&BOB).await;
    let bobs_shift = t.seed_shift(&BOB, "2026-10-07").await;
    t.publish().await;

    let response = post_json_auth(
        t.app.clone(),
        "/api/v1/shift-requests",
        &t.person_token(&ANA),
        serde_json::json!({ "type": "TAKE", "target_shift_id": bobs_shift }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::CREATED).await;
    let request_id = json["data"]["id"].as_str().unwrap().to_string();

    // Bob rejects outright.
    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/target-decision"),
        &t.person_token(&BOB),
        serde_json::json!({ "accept": false }),
    )
    .await;
    let json = common::expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "REJECTED_BY_TARGET");

    // Cancelling after rejection is a state conflict.
    let response = post_json_auth(
        t.app.clone(),
        &format!("/api/v1/shift-requests/{request_id}/cancel"),
        &t.person_token(&ANA),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // So is a manager decision on it.
    let manager = t.manager_token();
    let response = post_json_auth(
        t.app,
        &format!("/api/v1/shift-requests/{request_id}/manager-decision"),
        &manager,
        serde_json::json!({ "approve": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Employees see only requests they are part of; managers see all.
#[tokio::test]
async fn listing_is_identity_scoped() {
    let t = common::spawn_app().await;
    t.seed_config().await;
    t.seed_person(&ANA).await;
    t.seed_person(&BOB).await;
    let bobs_shift = t.seed_shift(&BOB, "2026-10-07").await;
    t.publish().await;

    post_json_auth(
        t.app.clone(),
        "/api/v1/shift-requests",
        &t.person_token(&ANA),
        serde_json::json!({ "type": "TAKE", "target_shift_id": bobs_shift }),
    )
    .await;

    for token in [t.person_token(&ANA), t.person_token(&BOB), t.manager_token()] {
        let response = get_auth(t.app.clone(), "/api/v1/shift-requests", &token).await;
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    let outsider = t.token("carol-uid", "carol@example.com", Some("Carol"));
    let response = get_auth(t.app, "/api/v1/shift-requests", &outsider).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
