//! Mail Transports
//!
//! `SmtpMailer` logs in over implicit TLS (SMTPS) and sends a single
//! plain-text message per call.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::EmailConfig;
use crate::digest::OutgoingEmail;
use crate::error::{MailerError, Result};

/// Delivery backend
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one message
    async fn send(&self, email: &OutgoingEmail) -> Result<()>;

    /// Transport name
    fn name(&self) -> &str;
}

fn mailbox(address: &str) -> Result<Mailbox> {
    address.parse().map_err(|e: lettre::address::AddressError| MailerError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Build the MIME message for an outgoing email
pub fn build_message(email: &OutgoingEmail) -> Result<Message> {
    Ok(Message::builder()
        .from(mailbox(&email.from)?)
        .to(mailbox(&email.to)?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?)
}

/// Authenticated SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    host: String,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose().to_string(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            transport,
            host: config.host.clone(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&EmailConfig::from_env()?)
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<()> {
        let message = build_message(email)?;

        let response = self.transport.send(message).await?;

        tracing::info!(
            host = %self.host,
            to = %email.to,
            code = %response.code(),
            "Email sent"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "SMTP"
    }
}
