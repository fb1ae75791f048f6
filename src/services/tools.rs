use chrono::NaiveDate;

use crate::models::{ExtractedIntent, ToolCall, ToolResults};
use crate::services::knowledge::{snippet, KnowledgeStore};
use crate::services::schedule::ScheduleStore;

/// Characters of knowledge base text handed to the responder.
pub const KNOWLEDGE_SNIPPET_CHARS: usize = 200;

pub struct ToolSpec {
    pub name: &'static str,
    pub purpose: &'static str,
}

const TOOL_SPECS: &[ToolSpec] = &[
    ToolSpec {
        name: "get_appointments",
        purpose: "check available appointment times",
    },
    ToolSpec {
        name: "read_knowledgebase",
        purpose: "check company information; name a topic as read_knowledgebase(\"topic\") to narrow it",
    },
    ToolSpec {
        name: "send_email",
        purpose: "respond to the customer",
    },
];

/// Tools the planner may name.
pub fn tool_specs() -> &'static [ToolSpec] {
    TOOL_SPECS
}

/// Turns a generated plan into the lookups to run.
pub trait PlanInterpreter: Send + Sync {
    fn interpret(&self, plan: &str, extracted: &ExtractedIntent) -> Vec<ToolCall>;
}

/// Case-insensitive marker search over the plan text.
pub struct KeywordPlanInterpreter {
    default_date: String,
    knowledge_markers: Vec<String>,
    appointment_markers: Vec<String>,
}

impl KeywordPlanInterpreter {
    pub fn new(default_date: impl Into<String>) -> Self {
        Self {
            default_date: default_date.into(),
            knowledge_markers: vec!["read_knowledgebase".to_string()],
            appointment_markers: vec!["get_appointments".to_string(), "appointments".to_string()],
        }
    }

    /// The extracted date when it is an ISO calendar date, else the default.
    fn appointment_date(&self, extracted: &ExtractedIntent) -> String {
        extracted
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").is_ok())
            .unwrap_or(self.default_date.as_str())
            .to_string()
    }
}

fn mentions(plan: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| plan.contains(m.as_str()))
}

/// The argument of the first `marker(...)` in the plan, accepting
/// `marker("topic")`, `marker('topic')` and `marker(keyword="topic")`.
fn marker_argument(plan: &str, markers: &[String]) -> Option<String> {
    markers.iter().find_map(|marker| {
        let start = plan.find(marker.as_str())? + marker.len();
        let rest = plan[start..].strip_prefix('(')?;
        let inner = &rest[..rest.find(')')?];
        let inner = match inner.split_once('=') {
            Some((name, value))
                if name.trim().chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                value
            }
            _ => inner,
        };
        let value = inner.trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

impl PlanInterpreter for KeywordPlanInterpreter {
    fn interpret(&self, plan: &str, extracted: &ExtractedIntent) -> Vec<ToolCall> {
        let plan = plan.to_lowercase();
        let mut calls = Vec::new();

        if mentions(&plan, &self.knowledge_markers) {
            calls.push(ToolCall::ReadKnowledgebase {
                keyword: marker_argument(&plan, &self.knowledge_markers).unwrap_or_default(),
            });
        }
        if mentions(&plan, &self.appointment_markers) {
            calls.push(ToolCall::GetAppointments {
                date: self.appointment_date(extracted),
            });
        }
        calls
    }
}

pub fn execute_tools(
    calls: &[ToolCall],
    knowledge: &KnowledgeStore,
    schedule: &ScheduleStore,
) -> anyhow::Result<ToolResults> {
    let mut results = ToolResults::default();

    for call in calls {
        tracing::info!(tool = call.name(), "executing tool");
        match call {
            ToolCall::ReadKnowledgebase { keyword } => {
                let text = knowledge.read(keyword)?;
                results.knowledgebase = Some(snippet(&text, KNOWLEDGE_SNIPPET_CHARS));
            }
            ToolCall::GetAppointments { date } => {
                let appointments = schedule.get_appointments(date)?;
                tracing::info!(
                    date = %date,
                    count = appointments.appointments.len(),
                    available = appointments.appointments.iter().filter(|s| s.is_available()).count(),
                    "appointments data retrieved"
                );
                results.appointments = Some(appointments);
            }
        }
    }

    if results.is_empty() {
        tracing::warn!("no tools were executed based on the plan");
    } else {
        tracing::info!(tools = ?results.keys(), "tools executed");
    }
    Ok(results)
}
