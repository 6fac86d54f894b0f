//! Bag-of-words cosine similarity between two candidate outputs.
//!
//! Texts are split on whitespace with no normalization, so the comparison is
//! case-sensitive and ignores token order.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scores strictly above this value count as agreement between two models.
pub const AGREEMENT_THRESHOLD: f64 = 0.8;

/// Builds the term-frequency multiset of a text.
fn term_frequencies(text: &str) -> HashMap<&str, u64> {
    let mut frequencies = HashMap::new();
    for token in text.split_whitespace() {
        *frequencies.entry(token).or_insert(0) += 1;
    }
    frequencies
}

fn squared_norm(frequencies: &HashMap<&str, u64>) -> u64 {
    frequencies.values().map(|count| count * count).sum()
}

/// Computes the cosine similarity of the two texts' token-frequency vectors.
///
/// Returns `0.0` when either text has no tokens.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let a = term_frequencies(a);
    let b = term_frequencies(b);

    let (norm_a, norm_b) = (squared_norm(&a), squared_norm(&b));
    if norm_a == 0 || norm_b == 0 {
        return 0.0;
    }

    let (smaller, larger) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let dot: u64 = smaller
        .iter()
        .filter_map(|(token, count)| larger.get(token).map(|other| count * other))
        .sum();

    // Integer sums keep the result exact for identical inputs and symmetric.
    let score = dot as f64 / ((norm_a as f64) * (norm_b as f64)).sqrt();
    score.clamp(0.0, 1.0)
}

/// Agreement metric between two extracted candidates.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityScore(f64);

impl SimilarityScore {
    /// Scores two texts with [`cosine_similarity`].
    pub fn between(a: impl AsRef<str>, b: impl AsRef<str>) -> Self {
        Self(cosine_similarity(a.as_ref(), b.as_ref()))
    }

    /// Returns the raw score in `[0, 1]`.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if the score exceeds [`AGREEMENT_THRESHOLD`].
    pub fn is_agreement(self) -> bool {
        self.0 > AGREEMENT_THRESHOLD
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl From<SimilarityScore> for f64 {
    fn from(score: SimilarityScore) -> Self {
        score.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_score_one() {
        let samples = [
            "a",
            "public static void main",
            "x x x y",
            "int a = 1 ; int b = 2 ; return a + b ;",
        ];

        for sample in samples {
            assert_eq!(cosine_similarity(sample, sample), 1.0, "sample: {sample:?}");
        }
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(cosine_similarity("", "class A {}"), 0.0);
        assert_eq!(cosine_similarity("class A {}", ""), 0.0);
        assert_eq!(cosine_similarity("   \n\t", "class A {}"), 0.0);
        assert_eq!(cosine_similarity("", ""), 0.0);
    }

    #[test]
    fn disjoint_tokens_score_zero() {
        assert_eq!(cosine_similarity("a b c", "d e f"), 0.0);
    }

    #[test]
    fn similarity_is_symmetric() {
        let pairs = [
            ("a b c", "a b d"),
            ("x x y", "x y y z"),
            ("public class A { }", "class A { int x ; }"),
        ];

        for (a, b) in pairs {
            assert_eq!(cosine_similarity(a, b), cosine_similarity(b, a));
        }
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(cosine_similarity("a b c", "c b a"), 1.0);
    }

    #[test]
    fn tokens_are_case_sensitive() {
        assert_eq!(cosine_similarity("Class", "class"), 0.0);
    }

    #[test]
    fn partial_overlap() {
        // [1,1] . [1,0,1] = 1; |a| = sqrt(2), |b| = sqrt(2)
        let score = cosine_similarity("a b", "a c");
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn agreement_threshold_is_strict() {
        assert!(SimilarityScore::between("a b c", "a b c").is_agreement());
        assert!(!SimilarityScore(AGREEMENT_THRESHOLD).is_agreement());
        assert!(!SimilarityScore::between("", "").is_agreement());
    }

    #[test]
    fn score_serializes_as_number() {
        let json = serde_json::to_string(&SimilarityScore::between("a", "a")).unwrap();
        assert_eq!(json, "1.0");
    }
}
