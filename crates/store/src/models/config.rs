//! The single application configuration document.

use serde::{Deserialize, Serialize};

/// Central configuration record (`app_config/main` in the document store).
///
/// Read per notification call, never cached process-wide; environment
/// variables act as the fallback when a field is unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfigDoc {
    /// Base URL of the web app, used for links embedded in emails.
    pub app_url: String,
    /// The manager's email address; also decides who gets manager rights.
    pub manager_email: String,
}
