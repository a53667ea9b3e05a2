use thiserror::Error;

/// Errors raised by the similarity engine.
///
/// Only [`SimilarityError::InvalidInput`] ever reaches a caller of
/// [`crate::similarity::engine::SimilarityEngine::compare`]; the computation
/// variants are caught inside the engine and degrade to the zero result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("vector space has an empty vocabulary")]
    EmptyVocabulary,

    #[error("similarity between sentence {row} and sentence {col} is not a finite number")]
    NonFinite { row: usize, col: usize },
}
