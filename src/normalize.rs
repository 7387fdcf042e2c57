//! Text normalization and tokenization
//!
//! All matching happens over a canonical form of the text: lowercased,
//! punctuation removed, whitespace collapsed. Apostrophes are kept so
//! contractions survive as single tokens ("don't" stays one word).

use std::sync::OnceLock;

use ahash::AHashSet;
use regex::Regex;

// Compiled once - these literal patterns never fail
fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s']").expect("Invalid punctuation pattern"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace pattern"))
}

/// Normalize raw text into its canonical comparable form.
///
/// Lowercases, deletes every character that is not a word character,
/// whitespace, or apostrophe, collapses whitespace runs to single spaces,
/// and trims. Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = punctuation_re().replace_all(&lowered, "");
    whitespace_re()
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

/// Split canonical text into its set of distinct tokens.
///
/// The empty string is never a token, so empty input yields an empty set.
pub fn tokenize(text: &str) -> AHashSet<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_punctuation_invariance() {
        assert_eq!(normalize("Hello, World!"), normalize("hello world"));
        assert_eq!(normalize("Hello, World!"), "hello world");
    }

    #[test]
    fn test_apostrophes_survive() {
        assert_eq!(normalize("Don't PANIC!!"), "don't panic");
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        assert_eq!(normalize("  so \t many\n  spaces "), "so many spaces");
    }

    #[test]
    fn test_idempotent() {
        let samples = ["", "  Mixed CASE?! ", "already normal", "a'b c--d"];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_symbols_only_becomes_empty() {
        assert_eq!(normalize("?!#@ ... --"), "");
    }

    #[test]
    fn test_tokenize_distinct() {
        let tokens = tokenize("hello hello there");
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains("hello"));
        assert!(tokens.contains("there"));
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }
}
