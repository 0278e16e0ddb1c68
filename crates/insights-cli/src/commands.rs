//! Subcommand implementations
//!
//! Each command returns the text to print so the binary stays a thin shell.

use anyhow::{bail, Context as _};
use insight_core::{GenerationOptions, LlmProvider};
use insight_mailer::{send_digest, EmailConfig, MailTransport};

use crate::context::AppContext;

/// Connected accounts, one `name - id` line each
pub async fn accounts(ctx: &mut AppContext) -> anyhow::Result<String> {
    ctx.pull_accounts().await?;

    let registry = ctx.user().registry();
    if registry.account_names().is_empty() {
        return Ok("No connected brokerage accounts".to_string());
    }

    let lines: Vec<String> = registry
        .account_names()
        .into_iter()
        .map(|name| format!("{name} - {}", registry.account_id(name).unwrap_or_default()))
        .collect();
    Ok(lines.join("\n"))
}

/// Human-readable report for one account, or all of them
pub async fn report(ctx: &mut AppContext, account: Option<&str>) -> anyhow::Result<String> {
    if let Some(account) = account {
        if !ctx.try_pull_account(account).await? {
            tracing::warn!(account, "Holdings pull failed; reporting no data");
        }
        return Ok(ctx.user().format_portfolio_summary(account));
    }

    let outcomes = ctx.pull_all().await?;
    let failed: Vec<&str> = outcomes.iter()
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name.as_str())
        .collect();
    if !failed.is_empty() {
        tracing::warn!(accounts = ?failed, "Some accounts could not be pulled");
    }

    let reports: Vec<String> = outcomes.iter()
        .map(|(name, _)| ctx.user().format_portfolio_summary(name))
        .collect();
    Ok(reports.join("\n\n"))
}

/// Compact LLM-oriented rendering
pub async fn prompt(ctx: &mut AppContext, account: &str) -> anyhow::Result<String> {
    ctx.pull_account(account).await?;
    Ok(ctx.user().format_prompt(account))
}

/// Snapshot as pretty JSON; reduced unless `full`
pub async fn snapshot(ctx: &mut AppContext, account: &str, full: bool) -> anyhow::Result<String> {
    ctx.pull_account(account).await?;

    let registry = ctx.user().registry();
    if full {
        let snapshot = registry.get_snapshot(account)
            .with_context(|| format!("no snapshot stored for {account:?}"))?;
        return Ok(serde_json::to_string_pretty(snapshot)?);
    }

    let small = registry.small_snapshot(account)
        .with_context(|| format!("no snapshot stored for {account:?}"))?;
    Ok(serde_json::to_string_pretty(&small)?)
}

/// Log provider status and the models it serves
pub async fn check_provider(provider: &dyn LlmProvider) {
    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to {}", provider.name());
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::debug!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ {} not available - insight generation will fail", provider.name());
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }
}

/// Model-generated insights for one account
pub async fn insights(
    ctx: &mut AppContext,
    provider: &dyn LlmProvider,
    options: &GenerationOptions,
    account: &str,
) -> anyhow::Result<String> {
    ctx.pull_account(account).await?;
    let prompt = ctx.user().format_prompt(account);

    match holdings::generate_insights(provider, &prompt, options).await {
        Ok(text) => Ok(text),
        Err(e) => bail!("{} ({e})", e.user_message()),
    }
}

/// Report plus insights delivered by email
pub async fn email(
    ctx: &mut AppContext,
    provider: Option<&dyn LlmProvider>,
    options: &GenerationOptions,
    transport: &dyn MailTransport,
    config: &EmailConfig,
    account: &str,
) -> anyhow::Result<String> {
    ctx.pull_account(account).await?;
    let report = ctx.user().format_portfolio_summary(account);

    let insights = match provider {
        Some(provider) => {
            let prompt = ctx.user().format_prompt(account);
            match holdings::generate_insights(provider, &prompt, options).await {
                Ok(text) => Some(text),
                Err(e) => bail!("{} ({e})", e.user_message()),
            }
        }
        None => None,
    };

    if let Err(e) = send_digest(transport, config, &report, insights.as_deref()).await {
        bail!("{} ({e})", e.user_message());
    }

    Ok(format!("Email sent to {}", config.to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use holdings::{AccountSummary, MockAggregatorClient, UserCredentials};
    use insight_core::{Completion, Message, ModelInfo, Secret};
    use insight_mailer::{OutgoingEmail, DEFAULT_SMTP_PORT};
    use std::sync::Mutex;

    const ACCOUNT: &str = "Robinhood Individual";

    fn ctx(client: MockAggregatorClient) -> AppContext {
        AppContext::new(Box::new(client), UserCredentials::new("u-1", "secret"))
    }

    struct CannedProvider(&'static str);

    #[async_trait]
    impl LlmProvider for CannedProvider {
        fn name(&self) -> &str {
            "Canned"
        }

        async fn health_check(&self) -> insight_core::Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            _messages: &[Message],
            options: &GenerationOptions,
        ) -> insight_core::Result<Completion> {
            Ok(Completion {
                content: self.0.to_string(),
                model: options.model.clone(),
                usage: None,
            })
        }

        async fn list_models(&self) -> insight_core::Result<Vec<ModelInfo>> {
            Ok(vec![])
        }
    }

    #[derive(Default)]
    struct Outbox(Mutex<Vec<OutgoingEmail>>);

    #[async_trait]
    impl MailTransport for Outbox {
        async fn send(&self, email: &OutgoingEmail) -> insight_mailer::Result<()> {
            self.0.lock().unwrap().push(email.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "Outbox"
        }
    }

    fn email_config() -> EmailConfig {
        EmailConfig {
            host: "smtp.example.com".into(),
            port: DEFAULT_SMTP_PORT,
            username: "insights@example.com".into(),
            password: Secret::new("pw"),
            from: "insights@example.com".into(),
            to: "me@example.com".into(),
            subject: "Portfolio Insights".into(),
        }
    }

    #[tokio::test]
    async fn test_accounts() {
        let out = accounts(&mut ctx(MockAggregatorClient::demo())).await.unwrap();
        assert_eq!(out, "Robinhood Individual - 3f2a9c1e-demo");
    }

    #[tokio::test]
    async fn test_report_single_account() {
        let out = report(&mut ctx(MockAggregatorClient::demo()), Some(ACCOUNT)).await.unwrap();
        assert!(out.contains("PORTFOLIO SUMMARY - Robinhood Individual"));
        assert!(out.contains("Total P&L: +$455.36"));
    }

    #[tokio::test]
    async fn test_report_unknown_account_fails() {
        let err = report(&mut ctx(MockAggregatorClient::demo()), Some("Fidelity")).await.unwrap_err();
        assert!(err.to_string().contains("Robinhood Individual"));
    }

    #[tokio::test]
    async fn test_report_failed_pull_prints_no_data() {
        let client = MockAggregatorClient::demo()
            .with_unavailable_account(AccountSummary::new("acc-down", "Broken Brokerage"));
        let out = report(&mut ctx(client), Some("Broken Brokerage")).await.unwrap();
        assert_eq!(out, "No holdings data available for account: Broken Brokerage");
    }

    #[tokio::test]
    async fn test_prompt_failed_pull_is_an_error() {
        let client = MockAggregatorClient::demo()
            .with_unavailable_account(AccountSummary::new("acc-down", "Broken Brokerage"));
        let err = prompt(&mut ctx(client), "Broken Brokerage").await.unwrap_err();
        assert!(err.to_string().contains("Broken Brokerage"));
    }

    #[tokio::test]
    async fn test_report_all_accounts_keeps_going() {
        let client = MockAggregatorClient::demo()
            .with_unavailable_account(AccountSummary::new("acc-down", "Broken Brokerage"));
        let out = report(&mut ctx(client), None).await.unwrap();

        assert!(out.starts_with("No holdings data available for account: Broken Brokerage"));
        assert!(out.contains("PORTFOLIO SUMMARY - Robinhood Individual"));
    }

    #[tokio::test]
    async fn test_snapshot_json() {
        let small = snapshot(&mut ctx(MockAggregatorClient::demo()), ACCOUNT, false).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&small).unwrap();
        assert_eq!(value["positions"].as_array().unwrap().len(), 2);
        assert!(value.get("orders").is_none());

        let full = snapshot(&mut ctx(MockAggregatorClient::demo()), ACCOUNT, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&full).unwrap();
        assert_eq!(value["orders"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_insights() {
        let provider = CannedProvider("<think>…</think>Diversify beyond AAPL.");
        let out = insights(
            &mut ctx(MockAggregatorClient::demo()),
            &provider,
            &GenerationOptions::default(),
            ACCOUNT,
        )
        .await
        .unwrap();
        assert_eq!(out, "Diversify beyond AAPL.");
    }

    #[tokio::test]
    async fn test_email_with_insights() {
        let provider = CannedProvider("Diversify beyond AAPL.");
        let outbox = Outbox::default();
        let out = email(
            &mut ctx(MockAggregatorClient::demo()),
            Some(&provider),
            &GenerationOptions::default(),
            &outbox,
            &email_config(),
            ACCOUNT,
        )
        .await
        .unwrap();

        assert_eq!(out, "Email sent to me@example.com");
        let sent = outbox.0.lock().unwrap();
        assert!(sent[0].body.starts_with("=================================================="));
        assert!(sent[0].body.ends_with("\n\nDiversify beyond AAPL."));
    }

    #[tokio::test]
    async fn test_email_skip_insights() {
        let outbox = Outbox::default();
        email(
            &mut ctx(MockAggregatorClient::demo()),
            None,
            &GenerationOptions::default(),
            &outbox,
            &email_config(),
            ACCOUNT,
        )
        .await
        .unwrap();

        let sent = outbox.0.lock().unwrap();
        assert!(!sent[0].body.contains("Diversify"));
    }
}
