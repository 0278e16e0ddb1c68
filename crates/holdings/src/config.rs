//! Aggregator Configuration
//!
//! Credentials come from the process environment (after `dotenvy` loads a
//! `.env` file in the binary). `from_lookup` variants exist so tests never
//! touch the real environment.

use insight_core::Secret;

use crate::error::{HoldingsError, Result};

/// Default SnapTrade API root
pub const DEFAULT_SNAPTRADE_BASE_URL: &str = "https://api.snaptrade.com/api/v1";

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| HoldingsError::Config(format!("{key} not set")))
}

/// Partner (client) credentials for the aggregator
#[derive(Clone, Debug)]
pub struct SnapTradeConfig {
    pub client_id: String,
    pub consumer_key: Secret,
    pub base_url: String,
}

impl SnapTradeConfig {
    pub fn new(client_id: impl Into<String>, consumer_key: impl Into<Secret>) -> Self {
        Self {
            client_id: client_id.into(),
            consumer_key: consumer_key.into(),
            base_url: DEFAULT_SNAPTRADE_BASE_URL.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `CLIENT_ID`, `CONSUMER_KEY` and optionally `SNAPTRADE_BASE_URL`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::new(required(&lookup, "CLIENT_ID")?, required(&lookup, "CONSUMER_KEY")?);
        if let Some(base_url) = lookup("SNAPTRADE_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        Ok(config)
    }
}

/// End-user credentials registered with the aggregator
#[derive(Clone, Debug)]
pub struct UserCredentials {
    pub user_id: String,
    pub user_secret: Secret,
}

impl UserCredentials {
    pub fn new(user_id: impl Into<String>, user_secret: impl Into<Secret>) -> Self {
        Self {
            user_id: user_id.into(),
            user_secret: user_secret.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `USER_ID` and `USER_SECRET`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self::new(required(&lookup, "USER_ID")?, required(&lookup, "USER_SECRET")?))
    }
}
