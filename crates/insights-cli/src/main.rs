//! portfolio-insights
//!
//! Pulls brokerage holdings through SnapTrade, prints reports and LLM-ready
//! snapshots, asks a local Ollama model for insights and emails the digest.

mod commands;
mod context;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use insight_core::{GenerationOptions, LlmProvider};
use insight_mailer::{EmailConfig, SmtpMailer};
use insight_runtime::OllamaProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::context::AppContext;

#[derive(Parser)]
#[command(name = "portfolio-insights", version, about = "Brokerage holdings reports and insights")]
struct Cli {
    /// Use the built-in demo account instead of SnapTrade
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List connected brokerage accounts
    Accounts,

    /// Print the portfolio summary (all accounts when none is given)
    Report {
        account: Option<String>,
    },

    /// Print the compact rendering sent to the model
    Prompt {
        account: String,
    },

    /// Print the reduced snapshot as JSON
    Snapshot {
        account: String,

        /// Print the full snapshot instead
        #[arg(long)]
        full: bool,
    },

    /// Generate insights with the local model
    Insights {
        account: String,
    },

    /// Email the report and insights
    Email {
        account: String,

        /// Send the report without insights
        #[arg(long)]
        skip_insights: bool,
    },
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let mut ctx = AppContext::load(cli.offline)?;

    match cli.command {
        Command::Accounts => commands::accounts(&mut ctx).await,
        Command::Report { account } => commands::report(&mut ctx, account.as_deref()).await,
        Command::Prompt { account } => commands::prompt(&mut ctx, &account).await,
        Command::Snapshot { account, full } => commands::snapshot(&mut ctx, &account, full).await,
        Command::Insights { account } => {
            let provider = OllamaProvider::from_env();
            commands::check_provider(&provider).await;
            commands::insights(&mut ctx, &provider, &GenerationOptions::from_env(), &account).await
        }
        Command::Email { account, skip_insights } => {
            let config = EmailConfig::from_env()?;
            let mailer = SmtpMailer::new(&config)?;

            let ollama = OllamaProvider::from_env();
            let provider: Option<&dyn LlmProvider> = if skip_insights {
                None
            } else {
                commands::check_provider(&ollama).await;
                Some(&ollama)
            };

            commands::email(
                &mut ctx,
                provider,
                &GenerationOptions::from_env(),
                &mailer,
                &config,
                &account,
            )
            .await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    match run(Cli::parse()).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
