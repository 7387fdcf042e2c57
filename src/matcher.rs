//! Intent matcher - scores and ranks knowledge-base intents against an
//! utterance and selects a response
//!
//! Scoring constants are behavior-compatible with existing knowledge bases
//! and must not be tuned independently of them.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::index::KnowledgeIndex;
use crate::normalize::{normalize, tokenize};
use crate::types::Pattern;

/// Base score for an exact-phrase hit; the pattern's character count is
/// added on top, so longer phrase matches outrank shorter ones.
pub const SUBSTRING_BASE_SCORE: u32 = 100;
/// Score per keyword shared between pattern and utterance.
pub const KEYWORD_SCORE: u32 = 5;
/// Bonus (plus the keyword count) when every pattern keyword is present.
pub const FULL_COVERAGE_BONUS: u32 = 20;
/// Bonus when shared keywords exceed [`COVERAGE_THRESHOLD`] of the pattern.
pub const PARTIAL_COVERAGE_BONUS: u32 = 10;
/// Fraction of a pattern's keywords that must match for the partial bonus.
pub const COVERAGE_THRESHOLD: f64 = 0.6;

/// Reply when the utterance normalizes to nothing and the fallback intent
/// has no responses.
pub const EMPTY_INPUT_PROMPT: &str = "Please say something.";
/// Reply of last resort when nothing matched and no fallback intent can
/// answer.
pub const UNRECOGNIZED_REPLY: &str =
    "I'm really not sure how to respond to that. Can you try asking differently?";

/// One scored pattern hit, alive only for the duration of a match call.
struct Candidate<'a> {
    responses: &'a [String],
    score: u32,
}

/// Select a response for `utterance` from the index.
///
/// Total over all inputs: falls back to the default intent's responses, or
/// to a fixed reply, when nothing matches. Response selection uses
/// thread-local randomness; see [`respond_with`] to inject a generator.
pub fn respond(utterance: &str, index: &KnowledgeIndex) -> String {
    respond_with(utterance, index, &mut rand::thread_rng())
}

/// Like [`respond`], with an explicit randomness source for response
/// selection.
pub fn respond_with<R>(utterance: &str, index: &KnowledgeIndex, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let input = normalize(utterance);
    if input.is_empty() {
        return match default_response(index, rng) {
            Some(reply) => reply,
            None => EMPTY_INPUT_PROMPT.to_string(),
        };
    }
    let input_keywords = tokenize(&input);

    let mut candidates: Vec<Candidate<'_>> = Vec::new();
    for intent in index.intents() {
        if intent.is_default() {
            // consulted only when nothing else matches
            continue;
        }
        for pattern in &intent.patterns {
            if let Some(score) = score_pattern(pattern, &input, &input_keywords) {
                candidates.push(Candidate {
                    responses: &intent.responses,
                    score,
                });
            }
        }
    }

    // Stable sort keeps document order among equal scores.
    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(best) = candidates.first() {
        if let Some(reply) = best.responses.choose(rng) {
            return reply.clone();
        }
        // a winner without responses never blocks the fallback
    }

    match default_response(index, rng) {
        Some(reply) => reply,
        None => UNRECOGNIZED_REPLY.to_string(),
    }
}

/// Score one pattern against the normalized utterance, or `None` when
/// nothing overlaps.
///
/// Exactly one of two rules applies. An exact-phrase occurrence anywhere in
/// the utterance scores [`SUBSTRING_BASE_SCORE`] plus the pattern length and
/// skips the keyword rule. Otherwise each shared keyword scores
/// [`KEYWORD_SCORE`], boosted when the shared set covers all, or most, of
/// the pattern's vocabulary.
fn score_pattern(pattern: &Pattern, input: &str, input_keywords: &AHashSet<String>) -> Option<u32> {
    if input.contains(pattern.text.as_str()) {
        return Some(SUBSTRING_BASE_SCORE + pattern.text.chars().count() as u32);
    }

    if pattern.keywords.is_empty() {
        return None;
    }
    let common = pattern
        .keywords
        .iter()
        .filter(|keyword| input_keywords.contains(keyword.as_str()))
        .count();
    if common == 0 {
        return None;
    }

    let mut score = common as u32 * KEYWORD_SCORE;
    if common == pattern.keywords.len() {
        score += FULL_COVERAGE_BONUS + pattern.keywords.len() as u32;
    } else if common as f64 / pattern.keywords.len() as f64 > COVERAGE_THRESHOLD {
        score += PARTIAL_COVERAGE_BONUS;
    }
    Some(score)
}

fn default_response<R>(index: &KnowledgeIndex, rng: &mut R) -> Option<String>
where
    R: Rng + ?Sized,
{
    index
        .default_intent()
        .and_then(|intent| intent.responses.choose(rng))
        .cloned()
}
