//! Command Context

use anyhow::{bail, Context as _};
use holdings::{
    AggregatorClient, BrokerageUser, MockAggregatorClient, SnapTradeClient, UserCredentials,
};

/// Aggregator client plus the user session it serves
pub struct AppContext {
    client: Box<dyn AggregatorClient>,
    user: BrokerageUser,
}

impl AppContext {
    pub fn new(client: Box<dyn AggregatorClient>, credentials: UserCredentials) -> Self {
        Self {
            client,
            user: BrokerageUser::new(credentials),
        }
    }

    /// SnapTrade with credentials from the environment, or the offline demo account
    pub fn load(offline: bool) -> anyhow::Result<Self> {
        if offline {
            tracing::info!("Using offline demo aggregator");
            return Ok(Self::new(
                Box::new(MockAggregatorClient::demo()),
                UserCredentials::new("demo-user", "demo-secret"),
            ));
        }

        let client = SnapTradeClient::from_env().context("SnapTrade is not configured")?;
        let credentials = UserCredentials::from_env().context("SnapTrade user is not configured")?;
        Ok(Self::new(Box::new(client), credentials))
    }

    pub const fn user(&self) -> &BrokerageUser {
        &self.user
    }

    pub async fn pull_accounts(&mut self) -> anyhow::Result<()> {
        if !self.user.pull_connected_accounts(self.client.as_ref()).await {
            bail!("could not list connected accounts from {}", self.client.name());
        }
        Ok(())
    }

    /// Refresh the account list, then one account's holdings.
    /// `Ok(false)` when the account is known but its holdings pull failed.
    pub async fn try_pull_account(&mut self, account: &str) -> anyhow::Result<bool> {
        self.pull_accounts().await?;
        if self.user.registry().account_id(account).is_none() {
            bail!(
                "unknown account {account:?}; connected accounts: {}",
                self.user.registry().account_names().join(", ")
            );
        }
        Ok(self.user.pull_account_holdings(self.client.as_ref(), account).await)
    }

    /// Like `try_pull_account`, but a failed holdings pull is an error
    pub async fn pull_account(&mut self, account: &str) -> anyhow::Result<()> {
        if !self.try_pull_account(account).await? {
            bail!("could not pull holdings for {account:?}");
        }
        Ok(())
    }

    /// Refresh the account list, then holdings for every account
    pub async fn pull_all(&mut self) -> anyhow::Result<Vec<(String, bool)>> {
        self.pull_accounts().await?;
        Ok(self.user.pull_all_holdings(self.client.as_ref()).await)
    }
}
