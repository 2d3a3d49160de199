//! Rule-based brand voice scoring.
//!
//! Deterministic and local: the same text and profile always give the same
//! score.

use crate::domain::models::BrandProfile;

const BASE_SCORE: i32 = 70;
const SHORT_SENTENCE_WORDS: f64 = 15.0;
const LONG_SENTENCE_WORDS: f64 = 25.0;
const SENTENCE_LENGTH_ADJUSTMENT: i32 = 10;
const SIGNATURE_BONUS: i32 = 5;
const SIGNATURE_BONUS_CAP: i32 = 15;
const AVOID_PENALTY: i32 = 5;

/// Intermediate values behind a heuristic score.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicBreakdown {
    pub sentence_count: usize,
    pub avg_words_per_sentence: f64,
    pub signature_hits: usize,
    pub avoided_hits: usize,
    pub score: u8,
}

/// Scores text against a brand profile using sentence length and phrase rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub const fn new() -> Self {
        Self
    }

    /// Score in `0..=100`.
    pub fn score(&self, text: &str, profile: &BrandProfile) -> u8 {
        self.breakdown(text, profile).score
    }

    pub fn breakdown(&self, text: &str, profile: &BrandProfile) -> HeuristicBreakdown {
        let sentences: Vec<&str> = text
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if sentences.is_empty() {
            return HeuristicBreakdown {
                sentence_count: 0,
                avg_words_per_sentence: 0.0,
                signature_hits: 0,
                avoided_hits: 0,
                score: clamp_score(BASE_SCORE),
            };
        }

        let total_words: usize = sentences
            .iter()
            .map(|s| s.split_whitespace().count())
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let avg_words = total_words as f64 / sentences.len() as f64;

        let mut score = BASE_SCORE;
        if avg_words < SHORT_SENTENCE_WORDS {
            score += SENTENCE_LENGTH_ADJUSTMENT;
        } else if avg_words > LONG_SENTENCE_WORDS {
            score -= SENTENCE_LENGTH_ADJUSTMENT;
        }

        let lowered = text.to_lowercase();
        let signature_hits = count_contained(&lowered, &profile.signature_phrases);
        let avoided_hits = count_contained(&lowered, &profile.avoid);

        score += (to_i32(signature_hits) * SIGNATURE_BONUS).min(SIGNATURE_BONUS_CAP);
        score -= to_i32(avoided_hits).saturating_mul(AVOID_PENALTY);

        HeuristicBreakdown {
            sentence_count: sentences.len(),
            avg_words_per_sentence: avg_words,
            signature_hits,
            avoided_hits,
            score: clamp_score(score),
        }
    }
}

/// Number of non-blank `needles` found in `haystack` (already lowercased).
fn count_contained(haystack: &str, needles: &[String]) -> usize {
    needles
        .iter()
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty() && haystack.contains(n.as_str()))
        .count()
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

fn clamp_score(score: i32) -> u8 {
    u8::try_from(score.clamp(0, 100)).unwrap_or(100)
}
