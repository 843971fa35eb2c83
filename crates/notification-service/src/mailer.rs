//! Mail transport seam.

use async_trait::async_trait;
use lettre::{
    transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport, Message,
    Tokio1Executor,
};

use crate::{NotificationError, SmtpConnection};

/// One delivery attempt. Implementations own the full transport session for
/// a single message; each call is independent of every other.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        connection: &SmtpConnection,
        message: Message,
    ) -> Result<(), NotificationError>;
}

/// Default mailer: a fresh STARTTLS session per message — connect,
/// authenticate, send, close.
pub struct SmtpMailer;

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        connection: &SmtpConnection,
        message: Message,
    ) -> Result<(), NotificationError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&connection.host)
            .map_err(|e| NotificationError::Smtp(format!("SMTP transport error: {}", e)))?
            .port(connection.port)
            .credentials(Credentials::new(
                connection.username.clone(),
                connection.password.clone(),
            ))
            .build();

        transport
            .send(message)
            .await
            .map_err(|e| NotificationError::Smtp(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
