use crate::config::AppConfig;
use crate::services::ai::LlmProvider;
use crate::services::knowledge::KnowledgeStore;
use crate::services::messaging::MailProvider;
use crate::services::schedule::ScheduleStore;
use crate::services::tools::PlanInterpreter;

pub struct AppState {
    pub config: AppConfig,
    pub llm: Box<dyn LlmProvider>,
    pub mailer: Box<dyn MailProvider>,
    pub interpreter: Box<dyn PlanInterpreter>,
    pub knowledge: KnowledgeStore,
    pub schedule: ScheduleStore,
}
