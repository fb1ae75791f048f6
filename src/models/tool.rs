use serde::{Deserialize, Serialize};

use super::Appointments;

#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    ReadKnowledgebase { keyword: String },
    GetAppointments { date: String },
}

impl ToolCall {
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::ReadKnowledgebase { .. } => "read_knowledgebase",
            ToolCall::GetAppointments { .. } => "get_appointments",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledgebase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointments: Option<Appointments>,
}

impl ToolResults {
    pub fn is_empty(&self) -> bool {
        self.knowledgebase.is_none() && self.appointments.is_none()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.knowledgebase.is_some() {
            keys.push("knowledgebase");
        }
        if self.appointments.is_some() {
            keys.push("appointments");
        }
        keys
    }
}
