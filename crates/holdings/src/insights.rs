//! Portfolio Insights
//!
//! Sends the prompt rendering of a snapshot to an `LlmProvider` under a fixed
//! analyst instruction and returns the model's free-form text.

use insight_core::{GenerationOptions, InsightError, LlmProvider, Message};

/// System instruction for the insight request
pub const INSIGHTS_SYSTEM_PROMPT: &str = r"You are an expert financial analyst specializing in portfolio analysis and investment insights.

Your task is to analyze a user's investment portfolio snapshot and provide actionable insights. Focus on:

1. **Portfolio Overview**: Summarize the current state and key metrics
2. **Risk Assessment**: Evaluate diversification, concentration, and potential risks
3. **Performance Analysis**: Analyze P&L patterns and position performance
4. **Actionable Recommendations**: Provide specific, actionable advice
5. **Market Context**: Consider current market conditions in your analysis

Be concise but comprehensive. Use bullet points for clarity. If you notice any concerning patterns or opportunities, highlight them prominently.

Format your response with clear sections and use emojis sparingly for visual organization. Do not overwhelm the user, but do not be too brief. Be concise and to the point.";

/// System + user messages for one snapshot
#[must_use]
pub fn build_messages(snapshot_prompt: &str) -> Vec<Message> {
    vec![
        Message::system(INSIGHTS_SYSTEM_PROMPT),
        Message::user(format!(
            "Please analyze this portfolio snapshot and provide insights:\n\n{snapshot_prompt}"
        )),
    ]
}

/// Drop a leading `<think>…</think>` block emitted by reasoning models
#[must_use]
pub fn strip_reasoning(text: &str) -> &str {
    let trimmed = text.trim_start();
    if let Some(rest) = trimmed.strip_prefix("<think>") {
        if let Some(end) = rest.find("</think>") {
            return rest[end + "</think>".len()..].trim();
        }
    }
    text.trim()
}

/// Ask the model for insights on a prompt-variant rendering
pub async fn generate_insights(
    provider: &dyn LlmProvider,
    snapshot_prompt: &str,
    options: &GenerationOptions,
) -> insight_core::Result<String> {
    let messages = build_messages(snapshot_prompt);

    tracing::info!(provider = provider.name(), model = %options.model, "Requesting portfolio insights");

    let completion = provider.complete(&messages, options).await?;

    if let Some(usage) = &completion.usage {
        tracing::debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Insight generation finished"
        );
    }

    let insights = strip_reasoning(&completion.content);
    if insights.is_empty() {
        return Err(InsightError::EmptyResponse(completion.model));
    }

    Ok(insights.to_string())
}
