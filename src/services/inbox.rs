use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use crate::models::{Email, InboxRecord};
use crate::services::json_file;

pub fn load(path: &Path) -> anyhow::Result<InboxRecord> {
    tracing::info!(path = %path.display(), "loading emails");
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("email file not found: {}", path.display()))?;
    let record: InboxRecord = serde_json::from_str(&raw)
        .with_context(|| format!("invalid JSON in email file: {}", path.display()))?;
    tracing::debug!(count = record.emails.len(), "loaded emails");
    Ok(record)
}

pub fn save(path: &Path, record: &InboxRecord) -> anyhow::Result<()> {
    tracing::info!(path = %path.display(), "saving updated emails");
    json_file::write_atomic(path, record)
        .with_context(|| format!("failed to save emails to {}", path.display()))
}

/// Emails above the watermark in ascending id order. Duplicate ids keep
/// their first occurrence in document order.
pub fn pending(record: &InboxRecord) -> Vec<&Email> {
    let mut new_emails: Vec<&Email> = record
        .emails
        .iter()
        .filter(|e| e.id > record.last_processed_id)
        .collect();
    new_emails.sort_by_key(|e| e.id);

    let mut seen = HashSet::new();
    new_emails.retain(|e| {
        let first = seen.insert(e.id);
        if !first {
            tracing::warn!(email_id = e.id, "duplicate email id, skipping later occurrence");
        }
        first
    });
    new_emails
}
