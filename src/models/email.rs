use serde::{Deserialize, Serialize};

/// A received email. Headers may be absent or `null`; keys this crate does
/// not model are carried in `extra` so a save writes them back untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Email {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Email {
    /// Header block plus body, as handed to the intent extractor.
    pub fn render(&self) -> String {
        format!(
            "From: {}\nSubject: {}\nDate: {}\nBody: {}",
            self.from.as_deref().unwrap_or_default(),
            self.subject.as_deref().unwrap_or_default(),
            self.date.as_deref().unwrap_or_default(),
            self.body.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboxRecord {
    #[serde(default)]
    pub emails: Vec<Email>,
    #[serde(default)]
    pub last_processed_id: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_and_missing_headers_render_empty() {
        let email: Email =
            serde_json::from_str(r#"{"id":1,"from":null,"body":"I want to check appointments"}"#)
                .unwrap();
        assert_eq!(
            email.render(),
            "From: \nSubject: \nDate: \nBody: I want to check appointments"
        );
    }

    #[test]
    fn test_unknown_keys_survive_round_trip() {
        let raw = r#"{"id":2,"from":"a@b.com","to":"support@acme.com","cc":["c@d.com"],"attachments":[{"name":"x.pdf"}]}"#;
        let email: Email = serde_json::from_str(raw).unwrap();
        assert_eq!(email.extra["to"], "support@acme.com");

        let back = serde_json::to_value(&email).unwrap();
        assert_eq!(back, serde_json::from_str::<serde_json::Value>(raw).unwrap());
    }
}
