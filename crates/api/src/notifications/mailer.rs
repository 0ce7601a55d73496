//! The email delivery seam.
//!
//! Production delivery goes through the Brevo transactional API over
//! HTTPS. Tests (and local setups without an API key) plug in their own
//! [`Mailer`] implementation instead.

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EmailRecipient {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: Vec<EmailRecipient>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Email request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Email provider rejected the message: {status}: {body}")]
    Api { status: u16, body: String },
}

/// Outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// Brevo transactional email client.
pub struct BrevoMailer {
    client: reqwest::Client,
    api_key: String,
    sender_email: String,
    sender_name: String,
}

const BREVO_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

impl BrevoMailer {
    pub fn new(api_key: String, sender_email: String, sender_name: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            sender_email,
            sender_name,
        }
    }

    /// Build from `BREVO_API_KEY`, `SENDER_EMAIL`, `SENDER_NAME` env vars.
    /// Returns `None` when no API key is configured.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("BREVO_API_KEY").ok().filter(|k| !k.is_empty())?;
        let sender_email =
            std::env::var("SENDER_EMAIL").unwrap_or_else(|_| "no-reply@shiftboard.local".into());
        let sender_name = std::env::var("SENDER_NAME").unwrap_or_else(|_| "Shiftboard".into());
        Some(Self::new(api_key, sender_email, sender_name))
    }
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRequest<'a> {
    sender: BrevoSender<'a>,
    to: &'a [EmailRecipient],
    subject: &'a str,
    #[serde(rename = "htmlContent")]
    html_content: &'a str,
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let request = BrevoRequest {
            sender: BrevoSender {
                name: &self.sender_name,
                email: &self.sender_email,
            },
            to: &message.to,
            subject: &message.subject,
            html_content: &message.html,
        };

        let response = self
            .client
            .post(BREVO_ENDPOINT)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MailerError::Api { status, body });
        }
        Ok(())
    }
}

/// Logs instead of sending. Used when no provider key is configured so the
/// rest of the system keeps working in development.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        tracing::info!(
            to = ?message.to.iter().map(|r| r.email.as_str()).collect::<Vec<_>>(),
            subject = %message.subject,
            "Email delivery disabled; dropping message"
        );
        Ok(())
    }
}
