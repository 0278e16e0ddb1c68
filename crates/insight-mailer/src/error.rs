//! Mailer Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, MailerError>;

/// Email-related errors
#[derive(Error, Debug)]
pub enum MailerError {
    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sender or recipient is not a valid mailbox
    #[error("Invalid address {address}: {reason}")]
    Address { address: String, reason: String },

    /// Message could not be assembled
    #[error("Message build error: {0}")]
    Build(String),

    /// SMTP connection, login or delivery failed
    #[error("Transport error: {0}")]
    Transport(String),
}

impl MailerError {
    /// Get user-friendly message
    pub const fn user_message(&self) -> &str {
        match self {
            Self::Config(_) => "Email is not configured. Check the SMTP_* and EMAIL_* variables.",
            Self::Address { .. } => "The sender or recipient address is invalid.",
            Self::Build(_) => "The email could not be assembled.",
            Self::Transport(_) => "The email could not be delivered. Please try again.",
        }
    }
}

impl From<lettre::transport::smtp::Error> for MailerError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<lettre::error::Error> for MailerError {
    fn from(err: lettre::error::Error) -> Self {
        Self::Build(err.to_string())
    }
}
