use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use super::{MailProvider, OutgoingEmail, SendOutcome};

pub struct MailgunProvider {
    api_key: Option<String>,
    domain: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl MailgunProvider {
    pub fn new(
        api_key: Option<String>,
        domain: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build Mailgun HTTP client")?;

        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            domain: domain.filter(|d| !d.trim().is_empty()),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl MailProvider for MailgunProvider {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<SendOutcome> {
        tracing::info!(to = %email.to, subject = %email.subject, "sending email");

        let (Some(api_key), Some(domain)) = (&self.api_key, &self.domain) else {
            tracing::error!(
                api_key_set = self.api_key.is_some(),
                domain_set = self.domain.is_some(),
                "Mailgun configuration missing"
            );
            return Ok(SendOutcome::ConfigMissing);
        };

        let url = format!("{}/v3/{}/messages", self.base_url, domain);
        let from = format!("AI Assistant <mailgun@{domain}>");

        let resp = self
            .client
            .post(&url)
            .basic_auth("api", Some(api_key))
            .form(&[
                ("from", from.as_str()),
                ("to", email.to.as_str()),
                ("subject", email.subject.as_str()),
                ("text", email.text_body.as_str()),
                ("html", email.html_body.as_str()),
            ])
            .send()
            .await
            .context("failed to send Mailgun email")?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .context("failed to read Mailgun response")?;
        let response = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        tracing::info!(status = status.as_u16(), response = %response, "Mailgun API response");

        Ok(SendOutcome::Sent {
            status: status.as_u16(),
            response,
        })
    }
}
