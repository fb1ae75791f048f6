use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedIntent {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub intent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuredDataLog {
    #[serde(default)]
    pub structured_data: Vec<ExtractedIntent>,
}
