use std::path::Path;

use anyhow::Context;

use crate::models::{ExtractedIntent, StructuredDataLog};
use crate::services::json_file;

pub fn load(path: &Path) -> anyhow::Result<StructuredDataLog> {
    if !path.exists() {
        return Ok(StructuredDataLog::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read structured data at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid structured data JSON in {}", path.display()))
}

/// Appends one record and rewrites the file. Records are never pruned.
pub fn append(path: &Path, record: &ExtractedIntent) -> anyhow::Result<()> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "data file not found, creating new one");
    }
    let mut log = load(path)?;
    log.structured_data.push(record.clone());

    json_file::write_atomic(path, &log)
        .with_context(|| format!("failed to write structured data to {}", path.display()))?;

    tracing::debug!(path = %path.display(), entries = log.structured_data.len(), "saved structured data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize) -> ExtractedIntent {
        ExtractedIntent {
            email: format!("customer{n}@example.com"),
            date: (n % 2 == 0).then(|| "2024-12-11".to_string()),
            intent: format!("intent {n}"),
        }
    }

    #[test]
    fn test_append_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");

        for n in 0..5 {
            append(&path, &record(n)).unwrap();
        }

        let log = load(&path).unwrap();
        let expected: Vec<ExtractedIntent> = (0..5).map(record).collect();
        assert_eq!(log.structured_data, expected);
    }

    #[test]
    fn test_append_preserves_existing_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"structured_data":[{"email":"old@example.com","intent":"Old"}]}"#,
        )
        .unwrap();

        append(&path, &record(1)).unwrap();

        let log = load(&path).unwrap();
        assert_eq!(log.structured_data.len(), 2);
        assert_eq!(log.structured_data[0].email, "old@example.com");
    }

    #[test]
    fn test_missing_date_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        append(&path, &record(1)).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("\"date\""));
    }
}
