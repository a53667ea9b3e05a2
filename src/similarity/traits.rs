// Sentence matcher trait: swap-ready abstraction.
//
// Batch workflows (one document against a corpus) only need "compare these
// two sentence lists". Keeping that behind a trait lets them run against a
// differently configured engine, or a fake in tests, without changing the
// batch code.

use super::result::SimilarityResult;

/// Anything that can compare two ordered sentence lists.
pub trait SentenceMatcher: Sync {
    /// Compare `sentences1` against `sentences2`. Implementations must not
    /// fail: degenerate inputs produce an empty result.
    fn compare_sentences(&self, sentences1: &[String], sentences2: &[String]) -> SimilarityResult;
}
