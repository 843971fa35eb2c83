//! Email notification dispatch for breached stock rules.
//!
//! Transport settings come from the process environment at dispatch time.
//! Delivery is sequential and per-recipient isolated: one recipient's
//! transport failure is logged and the rest of the batch still goes out.

mod mailer;
pub mod message;

pub use mailer::{Mailer, SmtpMailer};

use std::sync::Arc;

use alert_core::Breach;
use lettre::message::{header::ContentType, Mailbox};
use lettre::Message;

const DEFAULT_SMTP_PORT: u16 = 587;

/// Errors from the notification system.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("SMTP error: {0}")]
    Smtp(String),
    #[error("Invalid address: {0}")]
    Address(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Transport settings as found in the environment. `username` doubles as the
/// sender mailbox.
#[derive(Debug, Clone, Default)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Settings with everything required present.
#[derive(Debug, Clone)]
pub struct SmtpConnection {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl SmtpSettings {
    /// Read SMTP_HOST, SMTP_PORT, SMTP_USERNAME, SMTP_PASSWORD.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same resolution against an arbitrary source, for tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("SMTP_PORT") {
            None => DEFAULT_SMTP_PORT,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Invalid SMTP_PORT value {:?}, falling back to {}",
                    raw,
                    DEFAULT_SMTP_PORT
                );
                DEFAULT_SMTP_PORT
            }),
        };

        Self {
            host: lookup("SMTP_HOST").filter(|s| !s.is_empty()),
            port,
            username: lookup("SMTP_USERNAME").filter(|s| !s.is_empty()),
            password: lookup("SMTP_PASSWORD").filter(|s| !s.is_empty()),
        }
    }

    /// Require host, username, and password.
    pub fn connection(&self) -> Result<SmtpConnection, NotificationError> {
        let host = self
            .host
            .clone()
            .ok_or_else(|| NotificationError::Config("SMTP_HOST not set".into()))?;
        let username = self
            .username
            .clone()
            .ok_or_else(|| NotificationError::Config("SMTP_USERNAME not set".into()))?;
        let password = self
            .password
            .clone()
            .ok_or_else(|| NotificationError::Config("SMTP_PASSWORD not set".into()))?;

        Ok(SmtpConnection {
            host,
            port: self.port,
            username,
            password,
        })
    }
}

/// Dispatches breach alerts over a [`Mailer`].
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new() -> Self {
        Self {
            mailer: Arc::new(SmtpMailer),
        }
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Send one alert summarizing `breaches` to every recipient,
    /// fire-and-forget. Settings are resolved from the environment now, not
    /// at construction.
    pub async fn notify(&self, recipients: &[String], breaches: &[Breach]) {
        self.notify_with_settings(SmtpSettings::from_env(), recipients, breaches)
            .await;
    }

    /// [`Notifier::notify`] with explicit settings.
    pub async fn notify_with_settings(
        &self,
        settings: SmtpSettings,
        recipients: &[String],
        breaches: &[Breach],
    ) {
        if recipients.is_empty() || breaches.is_empty() {
            return;
        }

        let connection = match settings.connection() {
            Ok(connection) => connection,
            Err(e) => {
                tracing::error!("Notification aborted: {}", e);
                return;
            }
        };

        let sender: Mailbox = match connection.username.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                tracing::error!("Notification aborted: invalid sender address: {}", e);
                return;
            }
        };

        let subject = message::subject(breaches);
        let body = message::body(breaches);

        for recipient in recipients {
            match self
                .send_to(&connection, &sender, recipient, &subject, &body)
                .await
            {
                Ok(()) => tracing::info!("Alert email sent to {}", recipient),
                Err(e) => tracing::warn!("Failed to send alert email to {}: {}", recipient, e),
            }
        }
    }

    async fn send_to(
        &self,
        connection: &SmtpConnection,
        sender: &Mailbox,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), NotificationError> {
        let to: Mailbox = recipient
            .parse()
            .map_err(|e| NotificationError::Address(format!("{}: {}", recipient, e)))?;

        let email = Message::builder()
            .from(sender.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotificationError::Smtp(format!("Failed to build email: {}", e)))?;

        self.mailer.send(connection, email).await
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
