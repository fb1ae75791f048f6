pub mod mailgun;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

/// Result of a send attempt that did not fail in transport.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The provider answered; its response is passed through untouched.
    Sent {
        status: u16,
        response: serde_json::Value,
    },
    /// Credentials were absent, nothing was transmitted.
    ConfigMissing,
}

impl SendOutcome {
    pub fn is_error(&self) -> bool {
        match self {
            SendOutcome::Sent { status, .. } => !(200..300).contains(status),
            SendOutcome::ConfigMissing => true,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SendOutcome::Sent { response, .. } => response.clone(),
            SendOutcome::ConfigMissing => serde_json::json!({
                "status": "error",
                "message": "config missing",
            }),
        }
    }
}

#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<SendOutcome>;
}
