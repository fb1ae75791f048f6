use crate::errors::AppError;
use crate::models::{Email, ExtractedIntent};
use crate::services::ai::{LlmProvider, Message};

const SYSTEM_PROMPT: &str = r#"You are an intent extraction engine for a customer support inbox. Read the email and determine what the customer wants.

Return ONLY valid JSON (no markdown, no explanation) with this exact structure:
{
  "email": "the customer's email address",
  "date": "a date mentioned by the customer like 2024-12-11, omit if none",
  "intent": "short description of the request, e.g. Schedule Appointment"
}

The "email" and "intent" fields are required."#;

pub async fn extract_intent(llm: &dyn LlmProvider, email: &Email) -> anyhow::Result<ExtractedIntent> {
    let messages = [Message::user(email.render())];

    let response = llm.chat(SYSTEM_PROMPT, &messages).await?;

    let extracted = parse_intent_response(&response)?;
    tracing::info!(
        email_id = email.id,
        customer = %extracted.email,
        intent = %extracted.intent,
        "extracted intent"
    );
    Ok(extracted)
}

fn parse_intent_response(response: &str) -> Result<ExtractedIntent, AppError> {
    let value = parse_json_object(response).ok_or_else(|| {
        tracing::warn!("failed to parse LLM response as intent JSON");
        AppError::MalformedModelOutput(format!("not a JSON object: {response}"))
    })?;

    let email = required_field(&value, "email")?;
    let intent = required_field(&value, "intent")?;
    let date = value
        .get("date")
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(ExtractedIntent {
        email,
        date,
        intent,
    })
}

fn parse_json_object(response: &str) -> Option<serde_json::Value> {
    let is_object = |v: &serde_json::Value| v.is_object();

    if let Ok(v) = serde_json::from_str::<serde_json::Value>(response) {
        if is_object(&v) {
            return Some(v);
        }
    }

    // Strip markdown code fences
    let trimmed = response.trim();
    let cleaned = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    if let Ok(v) = serde_json::from_str::<serde_json::Value>(cleaned) {
        if is_object(&v) {
            return Some(v);
        }
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<serde_json::Value>(&cleaned[start..=end])
        .ok()
        .filter(is_object)
}

fn required_field(value: &serde_json::Value, field: &str) -> Result<String, AppError> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::MalformedModelOutput(format!("missing required field `{field}`")))
}
