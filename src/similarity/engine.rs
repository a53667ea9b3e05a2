// Similarity engine: the single entry point of the crate.
//
// raw sentences -> preprocess -> budget -> vector space -> match extraction
//
// Only a bad configuration is an error. Empty inputs, inputs that preprocess
// down to nothing, and numerical failures inside the computation all come
// back as the zero result, so one bad document never aborts a batch of
// comparisons.

use std::sync::Arc;

use tracing::{debug, warn};

use super::budget;
use super::error::SimilarityError;
use super::matcher;
use super::policy::SimilarityConfig;
use super::result::SimilarityResult;
use super::traits::SentenceMatcher;
use super::vector_space::VectorSpace;
use crate::text::normalize::{self, Normalizer};
use crate::text::preprocess::{preprocess, SentenceSlice};

/// A validated configuration plus the normalizer it runs with.
///
/// Holds no per-comparison state: every call to [`SimilarityEngine::compare`]
/// builds its own vector space. Cheap to share across threads.
#[derive(Clone)]
pub struct SimilarityEngine {
    config: SimilarityConfig,
    normalizer: Arc<Normalizer>,
}

impl SimilarityEngine {
    /// Validate `config` and build an engine on the process-wide normalizer.
    pub fn new(config: SimilarityConfig) -> Result<Self, SimilarityError> {
        config.validate()?;
        Ok(Self {
            config,
            normalizer: normalize::shared(),
        })
    }

    /// Use a private normalizer (and cache) instead of the shared one.
    pub fn with_normalizer(mut self, normalizer: Arc<Normalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Compare two documents given as ordered sentence lists.
    ///
    /// Never fails: degenerate inputs and internal failures produce
    /// [`SimilarityResult::empty`].
    pub fn compare<A, B>(&self, sentences1: &[A], sentences2: &[B]) -> SimilarityResult
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let policy = self.config.score_policy;
        let slice1 = preprocess(sentences1, self.config.min_length, &self.normalizer);
        let slice2 = preprocess(sentences2, self.config.min_length, &self.normalizer);

        if slice1.is_empty() || slice2.is_empty() {
            debug!(
                input1 = sentences1.len(),
                input2 = sentences2.len(),
                kept1 = slice1.len(),
                kept2 = slice2.len(),
                "Nothing left to compare after preprocessing"
            );
            return SimilarityResult::empty(policy);
        }

        let (slice1, slice2) = budget::apply(
            slice1,
            slice2,
            self.config.max_sentences_per_side,
            self.config.max_pairs,
        );

        match self.run(&slice1, &slice2) {
            Ok(result) => {
                debug!(
                    sentences1 = result.sentences1,
                    sentences2 = result.sentences2,
                    matches = result.matches.len(),
                    overall_score = result.overall_score,
                    "Comparison finished"
                );
                result
            }
            Err(e) => {
                warn!(error = %e, "Similarity computation failed, returning empty result");
                SimilarityResult {
                    sentences1: slice1.len(),
                    sentences2: slice2.len(),
                    ..SimilarityResult::empty(policy)
                }
            }
        }
    }

    fn run(
        &self,
        slice1: &SentenceSlice,
        slice2: &SentenceSlice,
    ) -> Result<SimilarityResult, SimilarityError> {
        let space = VectorSpace::build(
            &slice1.normalized,
            &slice2.normalized,
            self.config.ngram_range,
            self.config.max_features,
        )?;
        debug!(vocabulary = space.vocabulary().len(), "Built vector space");
        matcher::extract(slice1, slice2, &space, &self.config)
    }
}

impl SentenceMatcher for SimilarityEngine {
    fn compare_sentences(&self, sentences1: &[String], sentences2: &[String]) -> SimilarityResult {
        self.compare(sentences1, sentences2)
    }
}

/// Compare two sentence lists with the given matching policy and every other
/// knob at its default.
///
/// Returns [`SimilarityError::InvalidInput`] for a threshold outside [0, 1]
/// or a zero `max_results`.
pub fn compute_similarity<A, B>(
    sentences1: &[A],
    sentences2: &[B],
    min_similarity: f64,
    one_to_one: bool,
    max_results: usize,
) -> Result<SimilarityResult, SimilarityError>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let engine = SimilarityEngine::new(SimilarityConfig {
        min_similarity,
        one_to_one,
        max_results,
        ..Default::default()
    })?;
    Ok(engine.compare(sentences1, sentences2))
}
