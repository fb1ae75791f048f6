use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    pub mailgun_api_key: Option<String>,
    pub mailgun_domain: Option<String>,
    pub mailgun_base_url: String,
    pub inbox_path: PathBuf,
    pub knowledge_path: PathBuf,
    pub schedule_path: PathBuf,
    pub structured_data_path: PathBuf,
    pub default_appointment_date: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let openai_api_key = non_empty("OPENAI_API_KEY")
            .ok_or_else(|| AppError::Config("OPENAI_API_KEY must be set".to_string()))?;

        Ok(Self {
            openai_api_key,
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            mailgun_api_key: non_empty("MAILGUN_API_KEY"),
            mailgun_domain: non_empty("MAILGUN_DOMAIN"),
            mailgun_base_url: env::var("MAILGUN_BASE_URL")
                .unwrap_or_else(|_| "https://api.mailgun.net".to_string()),
            inbox_path: path_var("INBOX_PATH", "customer_req/incoming_emails.json"),
            knowledge_path: path_var("KNOWLEDGE_PATH", "docs/company_secrets.md"),
            schedule_path: path_var("SCHEDULE_PATH", "data/schedule.json"),
            structured_data_path: path_var("STRUCTURED_DATA_PATH", "data/data.json"),
            default_appointment_date: env::var("DEFAULT_APPOINTMENT_DATE")
                .unwrap_or_else(|_| "2024-12-11".to_string()),
            request_timeout: Duration::from_secs(
                env::var("REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60),
            ),
        })
    }

    /// Read on its own so logging can start before the rest of the config.
    pub fn log_dir_from_env() -> PathBuf {
        path_var("LOG_DIR", "logs")
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
