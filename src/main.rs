use std::path::Path;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use mail_agent::config::AppConfig;
use mail_agent::services::ai::openai::OpenAiProvider;
use mail_agent::services::knowledge::KnowledgeStore;
use mail_agent::services::messaging::mailgun::MailgunProvider;
use mail_agent::services::pipeline;
use mail_agent::services::schedule::ScheduleStore;
use mail_agent::services::tools::KeywordPlanInterpreter;
use mail_agent::state::AppState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    setup_logging(&AppConfig::log_dir_from_env());

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return Err(e.into());
        }
    };

    let llm = OpenAiProvider::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        config.openai_base_url.clone(),
        config.request_timeout,
    )?;
    tracing::info!("using OpenAI LLM provider (model: {})", config.openai_model);

    let mailer = MailgunProvider::new(
        config.mailgun_api_key.clone(),
        config.mailgun_domain.clone(),
        config.mailgun_base_url.clone(),
        config.request_timeout,
    )?;

    let state = AppState {
        llm: Box::new(llm),
        mailer: Box::new(mailer),
        interpreter: Box::new(KeywordPlanInterpreter::new(
            config.default_appointment_date.clone(),
        )),
        knowledge: KnowledgeStore::new(config.knowledge_path.clone()),
        schedule: ScheduleStore::new(config.schedule_path.clone()),
        config,
    };

    tracing::info!("starting email processing");
    if let Err(e) = pipeline::run_batch(&state).await {
        let error = format!("{e:#}");
        tracing::error!(%error, "fatal error in email processing");
        return Err(e);
    }

    Ok(())
}

/// Stderr plus a per-run log file; stderr only if the log directory
/// cannot be created.
fn setup_logging(log_dir: &Path) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if std::fs::create_dir_all(log_dir).is_ok() {
        let file_name = format!("agent_{}.log", chrono::Local::now().format("%Y%m%d_%H%M%S"));
        let file_appender = tracing_appender::rolling::never(log_dir, file_name);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}
