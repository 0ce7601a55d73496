use std::sync::Arc;

use shiftboard_store::StoreHandle;

use crate::config::ServerConfig;
use crate::notifications::mailer::Mailer;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store handle.
    pub store: StoreHandle,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Outbound email delivery (best-effort; swapped for a recording
    /// implementation in tests).
    pub mailer: Arc<dyn Mailer>,
}
