// Result types: what a comparison hands back to the caller.

use serde::{Deserialize, Serialize};

use super::policy::ScorePolicy;

/// A sentence from the first document paired with its near-duplicate in the
/// second document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Sentence from the first document, trimmed
    pub sentence1: String,
    /// Its best counterpart in the second document, trimmed
    pub sentence2: String,
    /// Cosine similarity in [0, 1]
    pub similarity_score: f64,
    /// Position of `sentence1` in the first input sequence
    pub index1: usize,
    /// Position of `sentence2` in the second input sequence
    pub index2: usize,
}

/// Ranked matches plus the aggregate score for one comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Highest similarity first, at most `max_results` entries
    pub matches: Vec<Match>,
    /// Aggregate score, on the scale of `policy`
    pub overall_score: f64,
    /// Formula that produced `overall_score`
    pub policy: ScorePolicy,
    /// Sentences of the first document that took part after filtering
    pub sentences1: usize,
    /// Sentences of the second document that took part after filtering
    pub sentences2: usize,
}

impl SimilarityResult {
    /// The "no similarity found" result: no matches, score 0.
    pub fn empty(policy: ScorePolicy) -> Self {
        Self {
            matches: Vec::new(),
            overall_score: 0.0,
            policy,
            sentences1: 0,
            sentences2: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Score as a fraction of the policy's maximum, for display.
    pub fn normalized_score(&self) -> f64 {
        self.overall_score / self.policy.scale()
    }
}
