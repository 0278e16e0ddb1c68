//! Digest Composition
//!
//! The email body is the plain-text report, followed by the model's insights
//! when there are any.

use crate::config::EmailConfig;

/// A plain-text message ready for a `MailTransport`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    /// Address a body using the configured sender, recipient and subject
    pub fn from_config(config: &EmailConfig, body: impl Into<String>) -> Self {
        Self {
            from: config.from.clone(),
            to: config.to.clone(),
            subject: config.subject.clone(),
            body: body.into(),
        }
    }
}

/// Report text, then a blank line and the insights
#[must_use]
pub fn compose_digest(report: &str, insights: Option<&str>) -> String {
    match insights.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => format!("{report}\n\n{text}"),
        None => report.to_string(),
    }
}
