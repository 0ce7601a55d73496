//! Outbound email notifications.
//!
//! Workflow handlers call [`notify_best_effort`] after their state change
//! has committed; the external `{action, payload}` endpoint calls
//! [`dispatcher::dispatch`] directly. Delivery problems never roll back or
//! block the workflow operation that triggered them.

pub mod dispatcher;
pub mod mailer;
pub mod templates;

pub use dispatcher::{dispatch, EmailAction, NotifyConfig, NotifyError};

use shiftboard_store::Store;

use crate::notifications::mailer::Mailer;

/// Post-commit notification hook: dispatch the action and swallow any
/// failure with a warning. The caller's operation has already succeeded;
/// notifications are fire-and-forget.
pub async fn notify_best_effort(store: &Store, mailer: &dyn Mailer, action: EmailAction) {
    let tag = action.tag();
    match dispatch(store, mailer, action).await {
        Ok(outcome) => {
            tracing::debug!(action = tag, notified = outcome.notified, "Notification sent");
        }
        Err(err) => {
            tracing::warn!(action = tag, error = %err, "Notification delivery failed; continuing");
        }
    }
}
