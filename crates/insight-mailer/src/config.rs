//! Email Configuration

use insight_core::Secret;

use crate::error::{MailerError, Result};

/// Implicit-TLS submission port
pub const DEFAULT_SMTP_PORT: u16 = 465;

/// Subject used when `EMAIL_SUBJECT` is unset
pub const DEFAULT_SUBJECT: &str = "Portfolio Insights";

/// SMTP relay and envelope settings
#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Secret,
    pub from: String,
    pub to: String,
    pub subject: String,
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MailerError::Config(format!("{key} not set")))
}

impl EmailConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS`, `EMAIL_FROM`,
    /// `EMAIL_TO` and optionally `EMAIL_SUBJECT`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("SMTP_PORT").filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| MailerError::Config(format!("SMTP_PORT is not a port number: {raw}")))?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(Self {
            host: required(&lookup, "SMTP_HOST")?,
            port,
            username: required(&lookup, "SMTP_USER")?,
            password: Secret::new(required(&lookup, "SMTP_PASS")?),
            from: required(&lookup, "EMAIL_FROM")?,
            to: required(&lookup, "EMAIL_TO")?,
            subject: lookup("EMAIL_SUBJECT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("SMTP_HOST", "smtp.example.com"),
        ("SMTP_USER", "insights@example.com"),
        ("SMTP_PASS", "app-password"),
        ("EMAIL_FROM", "insights@example.com"),
        ("EMAIL_TO", "me@example.com"),
    ];

    #[test]
    fn test_defaults() {
        let config = EmailConfig::from_lookup(env(BASE)).unwrap();
        assert_eq!(config.port, DEFAULT_SMTP_PORT);
        assert_eq!(config.subject, DEFAULT_SUBJECT);
        assert!(!format!("{config:?}").contains("app-password"));
    }

    #[test]
    fn test_overrides() {
        let mut pairs = BASE.to_vec();
        pairs.push(("SMTP_PORT", "2465"));
        pairs.push(("EMAIL_SUBJECT", "Weekly holdings"));
        let config = EmailConfig::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.port, 2465);
        assert_eq!(config.subject, "Weekly holdings");
    }

    #[test]
    fn test_bad_port() {
        let mut pairs = BASE.to_vec();
        pairs.push(("SMTP_PORT", "smtp"));
        let err = EmailConfig::from_lookup(env(&pairs)).unwrap_err();
        assert!(matches!(err, MailerError::Config(msg) if msg.contains("SMTP_PORT")));
    }

    #[test]
    fn test_missing_recipient() {
        let pairs: Vec<_> = BASE.iter().copied().filter(|(k, _)| *k != "EMAIL_TO").collect();
        let err = EmailConfig::from_lookup(env(&pairs)).unwrap_err();
        assert!(err.to_string().contains("EMAIL_TO"));
    }
}
