//! SnapTrade Client
//!
//! Every request carries `clientId`, `timestamp`, `userId` and `userSecret`
//! as query parameters and a `Signature` header: base64 HMAC-SHA256, keyed by
//! the consumer key, over the compact JSON `{"content","path","query"}`.
//! https://docs.snaptrade.com/docs/implement-request-signature

use async_trait::async_trait;
use base64::prelude::*;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::{header::ACCEPT, Client, Url};
use serde_json::Value;
use sha2::Sha256;

use super::{parse_accounts, AggregatorClient};
use crate::config::{SnapTradeConfig, UserCredentials};
use crate::error::{HoldingsError, Result};
use crate::model::AccountSummary;

/// SnapTrade REST client
pub struct SnapTradeClient {
    http: Client,
    config: SnapTradeConfig,
}

impl SnapTradeClient {
    pub fn new(config: SnapTradeConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SnapTradeConfig::from_env()?))
    }

    /// Full request URL with auth query parameters for `path` (relative to the base URL)
    fn signed_url(&self, path: &str, user: &UserCredentials, timestamp: i64) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.config.base_url, path))
            .map_err(|e| HoldingsError::Config(format!("invalid SnapTrade URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("clientId", &self.config.client_id)
            .append_pair("timestamp", &timestamp.to_string())
            .append_pair("userId", &user.user_id)
            .append_pair("userSecret", user.user_secret.expose());

        Ok(url)
    }

    async fn get_json(&self, path: &str, user: &UserCredentials) -> Result<Value> {
        let url = self.signed_url(path, user, Utc::now().timestamp())?;
        let signature = sign_request(
            self.config.consumer_key.expose(),
            url.path(),
            url.query().unwrap_or_default(),
            None,
        )?;

        tracing::debug!(path = %url.path(), "SnapTrade GET");

        let response = self.http
            .get(url)
            .header(ACCEPT, "application/json")
            .header("Signature", signature)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HoldingsError::Aggregator {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

/// Base64 HMAC-SHA256 request signature
pub(crate) fn sign_request(
    consumer_key: &str,
    path: &str,
    query: &str,
    content: Option<&Value>,
) -> Result<String> {
    // Keys must appear in this order with no whitespace.
    let message = format!(
        r#"{{"content":{},"path":{},"query":{}}}"#,
        serde_json::to_string(content.unwrap_or(&Value::Null))?,
        serde_json::to_string(path)?,
        serde_json::to_string(query)?,
    );

    let mut mac = Hmac::<Sha256>::new_from_slice(consumer_key.as_bytes())
        .map_err(|e| HoldingsError::Signature(e.to_string()))?;
    mac.update(message.as_bytes());

    Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
}

#[async_trait]
impl AggregatorClient for SnapTradeClient {
    async fn list_accounts(&self, user: &UserCredentials) -> Result<Vec<AccountSummary>> {
        let raw = self.get_json("/accounts", user).await?;
        Ok(parse_accounts(&raw))
    }

    async fn get_holdings(&self, user: &UserCredentials, account_id: &str) -> Result<Value> {
        self.get_json(&format!("/accounts/{account_id}/holdings"), user).await
    }

    fn name(&self) -> &str {
        "SnapTrade"
    }
}
