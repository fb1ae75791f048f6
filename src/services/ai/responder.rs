use anyhow::Context;

use crate::errors::AppError;
use crate::models::ToolResults;
use crate::services::ai::{LlmProvider, Message};

const SYSTEM_PROMPT: &str = "You are responding to a customer's request. You have the user's intent and any extra data from tools. \
Provide a concise, friendly response suitable for an email body.";

pub async fn compose_reply(
    llm: &dyn LlmProvider,
    intent: &str,
    tool_results: &ToolResults,
) -> anyhow::Result<String> {
    let results = serde_json::to_string_pretty(tool_results)
        .context("failed to serialize tool results")?;
    let messages = [Message::user(format!(
        "Intent: {intent}\n\nTool Results:\n{results}"
    ))];

    let reply = llm.chat(SYSTEM_PROMPT, &messages).await?;
    let reply = reply.trim();
    if reply.is_empty() {
        return Err(AppError::Ai("model returned an empty reply".to_string()).into());
    }

    Ok(reply.to_string())
}

/// HTML variant of a plain reply, wrapped in a single paragraph.
pub fn to_html(text: &str) -> String {
    format!("<p>{text}</p>")
}
