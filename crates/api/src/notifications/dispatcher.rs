//! Action-tagged notification dispatch.
//!
//! [`EmailAction`] mirrors the external `{action, payload}` contract: the
//! eight action tags, each with a typed payload. [`dispatch`] resolves the
//! recipients and the template for an action and hands the message to the
//! [`Mailer`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shiftboard_core::availability::AvailabilityStatus;
use shiftboard_core::shift::ShiftStatus;
use shiftboard_core::shift_request::{RequestStatus, RequestType};
use shiftboard_core::staff::normalize_email;
use shiftboard_core::timeoff::{TimeOffStatus, TimeOffType};
use shiftboard_core::types::Area;
use shiftboard_store::repositories::{ConfigRepo, ShiftRepo};
use shiftboard_store::Store;

use crate::notifications::mailer::{EmailMessage, EmailRecipient, Mailer, MailerError};
use crate::notifications::templates;

/// Notification-time configuration, read per call from the central
/// configuration record with environment-variable fallback. Never cached
/// process-wide.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Base URL for links embedded in emails. Required.
    pub app_url: String,
    /// The manager's email. Empty when unconfigured; actions addressed to
    /// the manager then fall back to a payload-supplied address or fail.
    pub manager_email: String,
}

impl NotifyConfig {
    /// Load from the store's config document, falling back to the
    /// `APP_URL` / `MANAGER_EMAIL` environment variables per field.
    pub async fn load(store: &Store) -> Result<Self, NotifyError> {
        let doc = ConfigRepo::get(store).await.unwrap_or_default();
        let app_url = if doc.app_url.trim().is_empty() {
            std::env::var("APP_URL").unwrap_or_default()
        } else {
            doc.app_url
        };
        let app_url = app_url.trim().to_string();
        if app_url.is_empty() {
            return Err(NotifyError::Config(
                "Missing app URL (set the config record's app_url or APP_URL)".into(),
            ));
        }

        let manager_email = if doc.manager_email.trim().is_empty() {
            std::env::var("MANAGER_EMAIL").unwrap_or_default()
        } else {
            doc.manager_email
        };
        Ok(Self {
            app_url,
            manager_email: normalize_email(&manager_email),
        })
    }

    /// The manager address for manager-bound actions, preferring the
    /// configured one over a payload-supplied fallback.
    fn manager_or(&self, fallback: Option<&str>) -> Result<String, NotifyError> {
        if !self.manager_email.is_empty() {
            return Ok(self.manager_email.clone());
        }
        match fallback.map(normalize_email) {
            Some(email) if !email.is_empty() => Ok(email),
            _ => Err(NotifyError::Config(
                "Manager email not set (config record manager_email or MANAGER_EMAIL)".into(),
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Missing base URL or manager email; fails the whole call.
    #[error("Notification configuration error: {0}")]
    Config(String),

    /// The provider refused or the request failed.
    #[error("Notification delivery error: {0}")]
    Delivery(#[from] MailerError),

    /// The payload names a recipient we cannot resolve.
    #[error("Notification payload error: {0}")]
    Payload(String),
}

/// The external notification contract: eight action tags, each with its
/// structured payload. Serialized as `{ "action": ..., "payload": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "snake_case")]
pub enum EmailAction {
    #[serde(rename_all = "camelCase")]
    SchedulePublishedWeek { week_start: NaiveDate, area: Area },

    #[serde(rename_all = "camelCase")]
    SwapRequested {
        target_email: String,
        target_name: String,
        requester_name: String,
        requester_email: String,
        #[serde(rename = "type")]
        request_type: RequestType,
        #[serde(default)]
        note: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    SwapNeedsManager {
        requester_name: String,
        requester_email: String,
        target_name: String,
        target_email: String,
        /// Used only when no manager email is configured centrally.
        #[serde(default)]
        manager_email: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    SwapManagerDecision {
        requester_name: String,
        requester_email: String,
        target_name: String,
        target_email: String,
        status: RequestStatus,
    },

    #[serde(rename_all = "camelCase")]
    TimeoffPending {
        employee_name: String,
        employee_email: String,
        date: NaiveDate,
        #[serde(rename = "type")]
        time_off_type: TimeOffType,
        #[serde(default)]
        note: Option<String>,
        #[serde(default)]
        manager_email: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    TimeoffDecision {
        employee_name: String,
        employee_email: String,
        status: TimeOffStatus,
        date: NaiveDate,
        #[serde(rename = "type")]
        time_off_type: TimeOffType,
        #[serde(default)]
        note: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    AvailabilityPending {
        employee_name: String,
        employee_email: String,
        summary: String,
        #[serde(default)]
        manager_email: Option<String>,
    },

    #[serde(rename_all = "camelCase")]
    AvailabilityDecision {
        employee_name: String,
        employee_email: String,
        status: AvailabilityStatus,
        summary: String,
    },
}

impl EmailAction {
    /// The wire tag, for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            EmailAction::SchedulePublishedWeek { .. } => "schedule_published_week",
            EmailAction::SwapRequested { .. } => "swap_requested",
            EmailAction::SwapNeedsManager { .. } => "swap_needs_manager",
            EmailAction::SwapManagerDecision { .. } => "swap_manager_decision",
            EmailAction::TimeoffPending { .. } => "timeoff_pending",
            EmailAction::TimeoffDecision { .. } => "timeoff_decision",
            EmailAction::AvailabilityPending { .. } => "availability_pending",
            EmailAction::AvailabilityDecision { .. } => "availability_decision",
        }
    }
}

/// What a dispatch accomplished.
#[derive(Debug, Clone, Copy)]
pub struct DispatchOutcome {
    /// Number of distinct recipient mailboxes addressed.
    pub notified: usize,
}

fn recipient(email: &str, name: &str) -> EmailRecipient {
    EmailRecipient {
        email: normalize_email(email),
        name: if name.trim().is_empty() {
            "Employee".to_string()
        } else {
            name.to_string()
        },
    }
}

async fn send_one(
    mailer: &dyn Mailer,
    to: Vec<EmailRecipient>,
    subject: String,
    html: String,
) -> Result<(), NotifyError> {
    mailer
        .send(&EmailMessage { to, subject, html })
        .await
        .map_err(NotifyError::from)
}

/// Resolve recipients and template for `action` and deliver.
///
/// Configuration problems and (for single-recipient actions) delivery
/// problems surface as errors; the per-employee fan-out of
/// `schedule_published_week` is best-effort per recipient, matching the
/// external contract's "notified" count semantics.
pub async fn dispatch(
    store: &Store,
    mailer: &dyn Mailer,
    action: EmailAction,
) -> Result<DispatchOutcome, NotifyError> {
    let config = NotifyConfig::load(store).await?;

    match action {
        EmailAction::SchedulePublishedWeek { week_start, area } => {
            dispatch_schedule_published(store, mailer, &config, week_start, area).await
        }

        EmailAction::SwapRequested {
            target_email,
            target_name,
            requester_name,
            requester_email,
            request_type,
            note,
        } => {
            if normalize_email(&target_email).is_empty() {
                return Err(NotifyError::Payload("Missing targetEmail".into()));
            }
            let swaps_link = templates::link(&config.app_url, "/dashboard?tab=swaps");
            let (subject, html) = templates::swap_requested(
                &requester_name,
                &requester_email,
                request_type,
                note.as_deref(),
                &swaps_link,
            );
            send_one(
                mailer,
                vec![recipient(&target_email, &target_name)],
                subject,
                html,
            )
            .await?;
            Ok(DispatchOutcome { notified: 1 })
        }

        EmailAction::SwapNeedsManager {
            requester_name,
            requester_email,
            target_name,
            target_email,
            manager_email,
        } => {
            let manager = config.manager_or(manager_email.as_deref())?;
            let swaps_link = templates::link(&config.app_url, "/dashboard?tab=swaps");
            let (subject, html) = templates::swap_needs_manager(
                &requester_name,
                &requester_email,
                &target_name,
                &target_email,
                &swaps_link,
            );
            send_one(mailer, vec![recipient(&manager, "Manager")], subject, html).await?;
            Ok(DispatchOutcome { notified: 1 })
        }

        EmailAction::SwapManagerDecision {
            requester_name,
            requester_email,
            target_name,
            target_email,
            status,
        } => {
            let swaps_link = templates::link(&config.app_url, "/dashboard?tab=swaps");
            let (subject, html) = templates::swap_manager_decision(status, &swaps_link);
            let mut to = Vec::new();
            if !normalize_email(&requester_email).is_empty() {
                to.push(recipient(&requester_email, &requester_name));
            }
            if !normalize_email(&target_email).is_empty() {
                to.push(recipient(&target_email, &target_name));
            }
            let notified = to.len();
            if !to.is_empty() {
                send_one(mailer, to, subject, html).await?;
            }
            Ok(DispatchOutcome { notified })
        }

        EmailAction::TimeoffPending {
            employee_name,
            employee_email,
            date,
            time_off_type,
            note,
            manager_email,
        } => {
            let manager = config.manager_or(manager_email.as_deref())?;
            let timeoff_link = templates::link(&config.app_url, "/dashboard?tab=timeoff");
            let (subject, html) = templates::timeoff_pending(
                &employee_name,
                &employee_email,
                date,
                time_off_type,
                note.as_deref(),
                &timeoff_link,
            );
            send_one(mailer, vec![recipient(&manager, "Manager")], subject, html).await?;
            Ok(DispatchOutcome { notified: 1 })
        }

        EmailAction::TimeoffDecision {
            employee_name,
            employee_email,
            status,
            date,
            time_off_type,
            note,
        } => {
            if normalize_email(&employee_email).is_empty() {
                return Err(NotifyError::Payload("Missing employeeEmail".into()));
            }
            let timeoff_link = templates::link(&config.app_url, "/dashboard?tab=timeoff");
            let (subject, html) = templates::timeoff_decision(
                status,
                date,
                time_off_type,
                note.as_deref(),
                &timeoff_link,
            );
            send_one(
                mailer,
                vec![recipient(&employee_email, &employee_name)],
                subject,
                html,
            )
            .await?;
            Ok(DispatchOutcome { notified: 1 })
        }

        EmailAction::AvailabilityPending {
            employee_name,
            employee_email,
            summary,
            manager_email,
        } => {
            let manager = config.manager_or(manager_email.as_deref())?;
            let availability_link = templates::link(&config.app_url, "/dashboard?tab=availability");
            let (subject, html) = templates::availability_pending(
                &employee_name,
                &employee_email,
                &summary,
                &availability_link,
            );
            send_one(mailer, vec![recipient(&manager, "Manager")], subject, html).await?;
            Ok(DispatchOutcome { notified: 1 })
        }

        EmailAction::AvailabilityDecision {
            employee_name,
            employee_email,
            status,
            summary,
        } => {
            if normalize_email(&employee_email).is_empty() {
                return Err(NotifyError::Payload("Missing employeeEmail".into()));
            }
            let availability_link = templates::link(&config.app_url, "/dashboard?tab=availability");
            let (subject, html) = templates::availability_decision(
                status == AvailabilityStatus::Approved,
                &summary,
                &availability_link,
            );
            send_one(
                mailer,
                vec![recipient(&employee_email, &employee_name)],
                subject,
                html,
            )
            .await?;
            Ok(DispatchOutcome { notified: 1 })
        }
    }
}

/// One email per distinct employee holding newly published shifts that
/// week, each summarizing only that employee's shifts (date then start
/// order), plus a confirmation to the manager when configured. Individual
/// deliveries are best-effort.
async fn dispatch_schedule_published(
    store: &Store,
    mailer: &dyn Mailer,
    config: &NotifyConfig,
    week_start: NaiveDate,
    area: Area,
) -> Result<DispatchOutcome, NotifyError> {
    let published =
        ShiftRepo::list_week_area(store, week_start, area, Some(ShiftStatus::Published)).await;

    // Group per employee email; unassigned-account shifts have no mailbox.
    let mut by_email: std::collections::BTreeMap<String, Vec<_>> = Default::default();
    for shift in published {
        let email = normalize_email(&shift.assignee.email);
        if email.is_empty() {
            continue;
        }
        by_email.entry(email).or_default().push(shift);
    }

    let schedule_link = templates::link(
        &config.app_url,
        &format!("/dashboard?tab=week&weekStart={week_start}"),
    );

    let notified = by_email.len();
    for (email, shifts) in &by_email {
        let employee_name = shifts
            .first()
            .map(|s| s.assignee.name.clone())
            .unwrap_or_default();
        let (subject, html) = templates::schedule_published(
            &employee_name,
            shifts,
            week_start,
            area,
            &schedule_link,
        );
        let result = send_one(
            mailer,
            vec![recipient(email, &employee_name)],
            subject,
            html,
        )
        .await;
        if let Err(err) = result {
            tracing::warn!(email = %email, error = %err, "Schedule email failed for employee");
        }
    }

    if !config.manager_email.is_empty() {
        let (subject, html) = templates::publish_confirmation(week_start, area, &schedule_link);
        let result = send_one(
            mailer,
            vec![recipient(&config.manager_email, "Manager")],
            subject,
            html,
        )
        .await;
        if let Err(err) = result {
            tracing::warn!(error = %err, "Publish confirmation email failed");
        }
    }

    Ok(DispatchOutcome { notified })
}
