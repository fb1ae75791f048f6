use std::path::PathBuf;

use anyhow::Context;

/// Read-only company knowledge base, a plain-text or markdown document.
pub struct KnowledgeStore {
    path: PathBuf,
}

impl KnowledgeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the whole document, or with a keyword only the paragraphs
    /// mentioning it. Falls back to the whole document when nothing matches.
    /// Paragraphs are separated by blank lines, LF or CRLF.
    pub fn read(&self, keyword: &str) -> anyhow::Result<String> {
        let content = std::fs::read_to_string(&self.path).with_context(|| {
            format!("failed to read knowledge base at {}", self.path.display())
        })?;
        tracing::debug!(path = %self.path.display(), len = content.len(), "read knowledge base");

        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(content);
        }

        let needle = keyword.to_lowercase();
        let matches = paragraphs(&content)
            .into_iter()
            .filter(|p| p.to_lowercase().contains(&needle))
            .collect::<Vec<_>>();

        if matches.is_empty() {
            tracing::debug!(keyword, "no knowledge base paragraph matched, returning full text");
            return Ok(content);
        }
        Ok(matches.join("\n\n"))
    }
}

fn paragraphs(content: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

/// First `limit` characters followed by an ellipsis.
pub fn snippet(text: &str, limit: usize) -> String {
    let head: String = text.chars().take(limit).collect();
    format!("{head}...")
}
