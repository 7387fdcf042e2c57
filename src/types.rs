//! Core data types for the knowledge base and match results

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::normalize::tokenize;

/// Reserved tag of the fallback intent. It may carry zero patterns and is
/// consulted only when no other intent produces a usable response.
pub const DEFAULT_TAG: &str = "default";

/// One intent record as supplied by the knowledge-base document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIntent {
    pub tag: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub responses: Vec<String>,
}

/// A normalized example utterance used as a matching template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    /// Canonical pattern text; never empty once stored
    pub text: String,
    /// Distinct tokens of `text`
    pub keywords: AHashSet<String>,
}

impl Pattern {
    /// Build a pattern from already-normalized text.
    pub fn new(text: String) -> Self {
        let keywords = tokenize(&text);
        Self { text, keywords }
    }
}

/// An indexed intent: its tag, matching templates, and candidate responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intent {
    pub tag: String,
    pub patterns: Vec<Pattern>,
    pub responses: Vec<String>,
}

impl Intent {
    pub fn is_default(&self) -> bool {
        self.tag == DEFAULT_TAG
    }
}
