// Policy knobs for a comparison.
//
// Everything that changes match sensitivity or the meaning of the aggregate
// score lives here, so a given configuration always produces the same
// results and two runs can be compared by comparing their configs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SimilarityError;
use crate::text::preprocess::DEFAULT_MIN_LENGTH;

/// How the per-sentence matches are reduced to one aggregate score.
///
/// The two formulas are not numerically comparable. A caller should pick
/// one and stick with it for every comparison whose scores it stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    /// `coverage * mean similarity of matched sentences`, as a 0-100
    /// percentage. Computed over every match before truncation.
    #[default]
    Coverage,
    /// Mean similarity of the kept (post-truncation) matches, 0-1.
    MeanOfMatches,
}

impl ScorePolicy {
    /// Upper bound of scores produced under this policy.
    pub fn scale(&self) -> f64 {
        match self {
            ScorePolicy::Coverage => 100.0,
            ScorePolicy::MeanOfMatches => 1.0,
        }
    }
}

impl fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScorePolicy::Coverage => write!(f, "coverage"),
            ScorePolicy::MeanOfMatches => write!(f, "mean"),
        }
    }
}

impl FromStr for ScorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coverage" | "percentage" => Ok(ScorePolicy::Coverage),
            "mean" | "mean_of_matches" | "mean-of-matches" => Ok(ScorePolicy::MeanOfMatches),
            other => Err(format!(
                "unknown score policy '{other}' (expected 'coverage' or 'mean')"
            )),
        }
    }
}

/// Highest n-gram order a configuration may ask for.
pub const MAX_NGRAM: usize = 8;

/// Inclusive range of n-gram orders used to build terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRange {
    pub min: usize,
    pub max: usize,
}

impl Default for NgramRange {
    /// Unigrams and bigrams: the precision-oriented setting.
    fn default() -> Self {
        Self { min: 1, max: 2 }
    }
}

/// Full configuration of the matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// Pairs below this cosine similarity never match (default 0.2)
    pub min_similarity: f64,
    /// Forbid a slice-2 sentence from being matched more than once
    pub one_to_one: bool,
    /// Maximum number of matches returned (default 20)
    pub max_results: usize,
    /// Minimum trimmed sentence length in characters (default 20)
    pub min_length: usize,
    /// N-gram orders used as vocabulary terms (default 1..=2)
    pub ngram_range: NgramRange,
    /// Vocabulary cap, applied to the joint corpus (default 5,000)
    pub max_features: usize,
    /// Aggregate score formula
    pub score_policy: ScorePolicy,
    /// When set, a pair is only eligible if the shorter sentence is more than
    /// this fraction of the longer one's length
    pub min_length_ratio: Option<f64>,
    /// Per-side sentence cap applied after preprocessing (default 100)
    pub max_sentences_per_side: Option<usize>,
    /// Ceiling on `n * m` sentence pairs per comparison
    pub max_pairs: Option<usize>,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            min_similarity: 0.2,
            one_to_one: false,
            max_results: 20,
            min_length: DEFAULT_MIN_LENGTH,
            ngram_range: NgramRange::default(),
            max_features: 5_000,
            score_policy: ScorePolicy::default(),
            min_length_ratio: None,
            max_sentences_per_side: Some(100),
            max_pairs: None,
        }
    }
}

impl SimilarityConfig {
    /// Reject configurations that can't produce meaningful results.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(SimilarityError::InvalidInput(format!(
                "min_similarity must be within [0, 1], got {}",
                self.min_similarity
            )));
        }
        if self.max_results == 0 {
            return Err(SimilarityError::InvalidInput(
                "max_results must be at least 1".to_string(),
            ));
        }
        if self.ngram_range.min == 0
            || self.ngram_range.min > self.ngram_range.max
            || self.ngram_range.max > MAX_NGRAM
        {
            return Err(SimilarityError::InvalidInput(format!(
                "invalid n-gram range {}..={}",
                self.ngram_range.min, self.ngram_range.max
            )));
        }
        if self.max_features == 0 {
            return Err(SimilarityError::InvalidInput(
                "max_features must be at least 1".to_string(),
            ));
        }
        if let Some(ratio) = self.min_length_ratio {
            if !(0.0..1.0).contains(&ratio) {
                return Err(SimilarityError::InvalidInput(format!(
                    "min_length_ratio must be within [0, 1), got {ratio}"
                )));
            }
        }
        if self.max_sentences_per_side == Some(0) || self.max_pairs == Some(0) {
            return Err(SimilarityError::InvalidInput(
                "sentence budgets must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
