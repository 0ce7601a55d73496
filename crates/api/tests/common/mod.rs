//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router (same middleware stack as
//! production) over a fresh in-memory store and a recording mailer, and
//! provides request/response helpers plus token minting.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use tokio::sync::Mutex;
use tower::ServiceExt;

use async_trait::async_trait;
use http_body_util::BodyExt;

use shiftboard_api::auth::jwt::{generate_token, JwtConfig};
use shiftboard_api::config::ServerConfig;
use shiftboard_api::notifications::mailer::{EmailMessage, Mailer, MailerError};
use shiftboard_api::router::build_app_router;
use shiftboard_api::state::AppState;
use shiftboard_store::models::config::AppConfigDoc;
use shiftboard_store::repositories::ConfigRepo;
use shiftboard_store::{create_store, StoreHandle};

pub const MANAGER_EMAIL: &str = "manager@example.com";
pub const APP_URL: &str = "https://shiftboard.example.com";

/// Captures every message instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingMailer {
    pub async fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

/// Refuses every message, for delivery-failure paths.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<(), MailerError> {
        Err(MailerError::Api {
            status: 503,
            body: "provider down".into(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        timeoff_min_notice_days: 2,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiry_mins: 60,
        },
    }
}

/// Everything a test needs: the app, the store to seed documents, and the
/// mailer to assert on deliveries.
pub struct TestApp {
    pub app: Router,
    pub store: StoreHandle,
    pub mailer: Arc<RecordingMailer>,
    pub config: ServerConfig,
}

/// Build the full application router with all middleware layers over a
/// fresh store, mirroring the router construction in `main.rs`.
pub async fn spawn_app() -> TestApp {
    let config = test_config();
    let store = create_store();
    let mailer = Arc::new(RecordingMailer::default());

    let state = AppState {
        store: Arc::clone(&store),
        config: Arc::new(config.clone()),
        mailer: mailer.clone(),
    };
    let app = build_app_router(state, &config);

    TestApp {
        app,
        store,
        mailer,
        config,
    }
}

impl TestApp {
    /// Seed the central config record (app URL + manager email), which
    /// both manager gating and notification dispatch read.
    pub async fn seed_config(&self) {
        ConfigRepo::set(
            &self.store,
            AppConfigDoc {
                app_url: APP_URL.to_string(),
                manager_email: MANAGER_EMAIL.to_string(),
            },
        )
        .await;
    }

    /// Mint a session token for an arbitrary identity.
    pub fn token(&self, uid: &str, email: &str, name: Option<&str>) -> String {
        generate_token(uid, email, name, &self.config.jwt).expect("token minting should succeed")
    }

    /// A token that passes the manager gate (given `seed_config`).
    pub fn manager_token(&self) -> String {
        self.token("manager-uid", MANAGER_EMAIL, Some("Manager"))
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert status and return the parsed body in one step.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
