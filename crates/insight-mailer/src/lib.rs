//! # insight-mailer
//!
//! Email delivery for portfolio reports.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ report text  │────▶│   digest     │────▶│ MailTransport│──▶ SMTPS relay
//! │ + insights   │     │ (plain text) │     │  (SmtpMailer)│
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use insight_mailer::{compose_digest, send_digest, EmailConfig, SmtpMailer};
//!
//! let config = EmailConfig::from_env()?;
//! let mailer = SmtpMailer::new(&config)?;
//! send_digest(&mailer, &config, &report, Some(&insights)).await?;
//! ```

mod config;
mod digest;
mod error;
mod transport;

pub use config::{EmailConfig, DEFAULT_SMTP_PORT, DEFAULT_SUBJECT};
pub use digest::{compose_digest, OutgoingEmail};
pub use error::{MailerError, Result};
pub use transport::{build_message, MailTransport, SmtpMailer};

/// Compose the digest and hand it to the transport
pub async fn send_digest(
    transport: &dyn MailTransport,
    config: &EmailConfig,
    report: &str,
    insights: Option<&str>,
) -> Result<()> {
    let email = OutgoingEmail::from_config(config, compose_digest(report, insights));
    tracing::debug!(transport = transport.name(), bytes = email.body.len(), "Sending digest");
    transport.send(&email).await
}
