use crate::models::{Email, ExtractedIntent};
use crate::services::ai::{intent, planner, responder};
use crate::services::messaging::{OutgoingEmail, SendOutcome};
use crate::services::{inbox, structured_log, tools};
use crate::state::AppState;

pub const REPLY_SUBJECT: &str = "Re: Your Inquiry";

#[derive(Debug, Clone)]
pub struct ProcessedEmail {
    pub extracted: ExtractedIntent,
    pub reply: String,
    pub outcome: SendOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub processed: Vec<i64>,
    pub failed: Vec<i64>,
    pub last_processed_id: i64,
}

/// Extract, log, plan, run tools, reply and send for one email.
pub async fn process_email(state: &AppState, email: &Email) -> anyhow::Result<ProcessedEmail> {
    tracing::info!(email_id = email.id, "processing email");

    let extracted = intent::extract_intent(state.llm.as_ref(), email).await?;
    structured_log::append(&state.config.structured_data_path, &extracted)?;

    let plan = planner::create_plan(state.llm.as_ref(), &extracted.intent).await?;
    let calls = state.interpreter.interpret(&plan, &extracted);
    let tool_results = tools::execute_tools(&calls, &state.knowledge, &state.schedule)?;

    let reply = responder::compose_reply(state.llm.as_ref(), &extracted.intent, &tool_results).await?;

    let outgoing = OutgoingEmail {
        to: extracted.email.clone(),
        subject: REPLY_SUBJECT.to_string(),
        html_body: responder::to_html(&reply),
        text_body: reply.clone(),
    };
    let outcome = state.mailer.send(&outgoing).await?;
    if outcome.is_error() {
        tracing::error!(email_id = email.id, response = %outcome.to_json(), "reply was not accepted");
    }

    tracing::info!(email_id = email.id, "successfully processed email");
    Ok(ProcessedEmail {
        extracted,
        reply,
        outcome,
    })
}

/// One pass over the inbox. Only inbox load/save errors are returned; a
/// failing email is logged and left above the watermark.
pub async fn run_batch(state: &AppState) -> anyhow::Result<BatchReport> {
    let mut record = inbox::load(&state.config.inbox_path)?;
    let mut report = BatchReport {
        last_processed_id: record.last_processed_id,
        ..Default::default()
    };

    let new_emails = inbox::pending(&record);
    tracing::info!(count = new_emails.len(), "found new emails to process");

    for email in new_emails {
        match process_email(state, email).await {
            Ok(_) => {
                report.last_processed_id = report.last_processed_id.max(email.id);
                report.processed.push(email.id);
            }
            Err(e) => {
                let error = format!("{e:#}");
                tracing::error!(email_id = email.id, %error, "failed to process email");
                report.failed.push(email.id);
            }
        }
    }

    record.last_processed_id = report.last_processed_id;
    inbox::save(&state.config.inbox_path, &record)?;

    tracing::info!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        last_processed_id = report.last_processed_id,
        "email processing completed"
    );
    Ok(report)
}
