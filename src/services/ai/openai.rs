use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{LlmProvider, Message};
use crate::errors::AppError;

pub struct OpenAiProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build OpenAI HTTP client")?;

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn chat(&self, system_prompt: &str, messages: &[Message]) -> anyhow::Result<String> {
        let mut chat_messages = vec![json!({
            "role": "system",
            "content": system_prompt,
        })];

        for msg in messages {
            chat_messages.push(json!({
                "role": msg.role,
                "content": msg.content,
            }));
        }

        let body = json!({
            "model": self.model,
            "messages": chat_messages,
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to call OpenAI API")?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("failed to read OpenAI response")?;

        if !status.is_success() {
            return Err(AppError::Ai(format!("OpenAI API error ({status}): {text}")).into());
        }

        let data: serde_json::Value =
            serde_json::from_str(&text).context("failed to parse OpenAI response")?;

        data["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::Ai("missing content in OpenAI response".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::http_stub::serve_once;

    fn provider(base_url: String) -> OpenAiProvider {
        OpenAiProvider::new(
            "sk-test".to_string(),
            "gpt-4o".to_string(),
            base_url,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_chat_returns_first_choice_content() {
        let (base_url, request) = serve_once(
            "200 OK",
            "application/json",
            r#"{"choices":[{"message":{"role":"assistant","content":"Step 1: read_knowledgebase"}}]}"#,
        )
        .await;

        let reply = provider(base_url)
            .chat("You plan.", &[Message::user("Refund please")])
            .await
            .unwrap();
        let request = request.await.unwrap();

        assert_eq!(reply, "Step 1: read_knowledgebase");
        assert!(request.request_line.starts_with("POST /chat/completions "));
        assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
        let body: serde_json::Value = serde_json::from_str(&request.body).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You plan.");
        assert_eq!(body["messages"][1]["content"], "Refund please");
    }

    #[tokio::test]
    async fn test_json_error_status_is_ai_error() {
        let (base_url, request) = serve_once(
            "500 Internal Server Error",
            "application/json",
            r#"{"error":{"message":"overloaded"}}"#,
        )
        .await;

        let err = provider(base_url)
            .chat("sys", &[Message::user("hi")])
            .await
            .unwrap_err();
        request.await.unwrap();

        match err.downcast_ref::<AppError>() {
            Some(AppError::Ai(msg)) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("overloaded"));
            }
            other => panic!("expected Ai error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body_keeps_status() {
        let (base_url, request) = serve_once(
            "502 Bad Gateway",
            "text/html",
            "<html><body>Bad Gateway</body></html>",
        )
        .await;

        let err = provider(base_url)
            .chat("sys", &[Message::user("hi")])
            .await
            .unwrap_err();
        request.await.unwrap();

        match err.downcast_ref::<AppError>() {
            Some(AppError::Ai(msg)) => {
                assert!(msg.contains("502"));
                assert!(msg.contains("Bad Gateway"));
            }
            other => panic!("expected Ai error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_ai_error() {
        let (base_url, request) = serve_once("200 OK", "application/json", r#"{"choices":[]}"#).await;

        let err = provider(base_url)
            .chat("sys", &[Message::user("hi")])
            .await
            .unwrap_err();
        request.await.unwrap();

        assert!(matches!(err.downcast_ref::<AppError>(), Some(AppError::Ai(_))));
    }
}
