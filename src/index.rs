//! Knowledge-base loading and the immutable match index

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::normalize::normalize;
use crate::types::{Intent, Pattern, RawIntent, DEFAULT_TAG};

/// Failure to load a knowledge-base document.
///
/// Non-fatal by contract: callers report it and keep running without
/// knowledge-base responses.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read knowledge base: {0}")]
    Read(#[from] std::io::Error),
    #[error("knowledge base is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("knowledge base has no \"intents\" collection")]
    MissingIntents,
}

/// Immutable, queryable index over a knowledge base.
///
/// Built once, read-only afterwards; safe to share across concurrent match
/// calls. Document order of intents and patterns is preserved because equal
/// scores tie-break on first-seen order.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeIndex {
    intents: Vec<Intent>,
}

impl KnowledgeIndex {
    /// Build an index from structured intent records.
    ///
    /// Patterns that normalize to the empty string are dropped; an intent
    /// that retains no patterns is dropped too, unless it is the reserved
    /// fallback intent. Intents without a tag carry no identity and are
    /// skipped.
    pub fn build<I>(raw: I) -> Self
    where
        I: IntoIterator<Item = RawIntent>,
    {
        let mut intents = Vec::new();
        for entry in raw {
            if entry.tag.is_empty() {
                tracing::warn!("skipping intent with empty tag");
                continue;
            }
            let patterns: Vec<Pattern> = entry
                .patterns
                .iter()
                .map(|p| normalize(p))
                .filter(|text| !text.is_empty())
                .map(Pattern::new)
                .collect();
            if patterns.is_empty() && entry.tag != DEFAULT_TAG {
                tracing::debug!(tag = %entry.tag, "dropping intent with no usable patterns");
                continue;
            }
            intents.push(Intent {
                tag: entry.tag,
                patterns,
                responses: entry.responses,
            });
        }
        tracing::debug!(intents = intents.len(), "knowledge index built");
        Self { intents }
    }

    /// Parse a JSON knowledge-base document and build the index from it.
    pub fn from_json_str(document: &str) -> Result<Self, LoadError> {
        Ok(Self::build(parse_document(document)?))
    }

    /// Read a JSON knowledge-base file and build the index from it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Indexed intents in document order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// First intent carrying the reserved fallback tag, if any.
    pub fn default_intent(&self) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.is_default())
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

/// Extract intent records from a JSON document.
///
/// The document must be an object with an `"intents"` array. Individual
/// malformed entries (missing or non-string tag) are skipped with a warning
/// rather than aborting the load; non-array `patterns`/`responses` fields
/// are treated as empty, and non-string items inside them are ignored.
pub fn parse_document(document: &str) -> Result<Vec<RawIntent>, LoadError> {
    let value: Value = serde_json::from_str(document)?;
    let entries = value
        .get("intents")
        .and_then(Value::as_array)
        .ok_or(LoadError::MissingIntents)?;

    let mut raw = Vec::with_capacity(entries.len());
    for entry in entries {
        let tag = match entry.get("tag").and_then(Value::as_str) {
            Some(tag) if !tag.is_empty() => tag.to_owned(),
            _ => {
                tracing::warn!("skipping intent entry without a usable tag");
                continue;
            }
        };
        raw.push(RawIntent {
            tag,
            patterns: string_items(entry.get("patterns")),
            responses: string_items(entry.get("responses")),
        });
    }
    Ok(raw)
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(tag: &str, patterns: &[&str], responses: &[&str]) -> RawIntent {
        RawIntent {
            tag: tag.to_string(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_normalizes_patterns() {
        let index = KnowledgeIndex::build(vec![intent(
            "greeting",
            &["Hello There!", "  HI  "],
            &["Hi!"],
        )]);
        assert_eq!(index.len(), 1);
        let patterns = &index.intents()[0].patterns;
        assert_eq!(patterns[0].text, "hello there");
        assert_eq!(patterns[1].text, "hi");
    }

    #[test]
    fn test_build_drops_empty_patterns_and_bare_intents() {
        let index = KnowledgeIndex::build(vec![
            intent("noise", &["?!?", "..."], &["never reachable"]),
            intent("greeting", &["hello", "!!!"], &["Hi!"]),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.intents()[0].tag, "greeting");
        assert_eq!(index.intents()[0].patterns.len(), 1);
    }

    #[test]
    fn test_build_keeps_default_without_patterns() {
        let index = KnowledgeIndex::build(vec![intent("default", &[], &["Hmm."])]);
        assert_eq!(index.len(), 1);
        assert!(index.default_intent().is_some());
    }

    #[test]
    fn test_build_skips_empty_tag() {
        let index = KnowledgeIndex::build(vec![intent("", &["hello"], &["Hi!"])]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_default_intent_is_first_of_that_tag() {
        let index = KnowledgeIndex::build(vec![
            intent("default", &[], &["first"]),
            intent("default", &[], &["second"]),
        ]);
        assert_eq!(index.default_intent().unwrap().responses[0], "first");
    }

    #[test]
    fn test_from_json_preserves_document_order() {
        let doc = r#"{"intents": [
            {"tag": "b", "patterns": ["beta"], "responses": ["B"]},
            {"tag": "a", "patterns": ["alpha"], "responses": ["A"]}
        ]}"#;
        let index = KnowledgeIndex::from_json_str(doc).unwrap();
        assert_eq!(index.intents()[0].tag, "b");
        assert_eq!(index.intents()[1].tag, "a");
    }

    #[test]
    fn test_malformed_entries_skipped_locally() {
        let doc = r#"{"intents": [
            {"tag": 7, "patterns": ["x"], "responses": ["X"]},
            {"patterns": ["y"], "responses": ["Y"]},
            {"tag": "ok", "patterns": "not-a-list", "responses": ["fine"]},
            {"tag": "kept", "patterns": ["hello", 42], "responses": ["Hi!", null]}
        ]}"#;
        let raw = parse_document(doc).unwrap();
        // entry with non-list patterns survives (treated as pattern-less),
        // as does the one with mixed-type items
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].tag, "ok");
        assert!(raw[0].patterns.is_empty());
        assert_eq!(raw[1].patterns, vec!["hello".to_string()]);
        assert_eq!(raw[1].responses, vec!["Hi!".to_string()]);
    }

    #[test]
    fn test_missing_intents_collection() {
        let err = KnowledgeIndex::from_json_str(r#"{"version": 1}"#).unwrap_err();
        assert!(matches!(err, LoadError::MissingIntents));
    }

    #[test]
    fn test_invalid_json() {
        let err = KnowledgeIndex::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = KnowledgeIndex::from_path("/nonexistent/knowledge_base.json").unwrap_err();
        assert!(matches!(err, LoadError::Read(_)));
    }
}
