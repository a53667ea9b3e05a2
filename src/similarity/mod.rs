// Similarity matching: TF-IDF vector space, match extraction, aggregate scoring.

pub mod budget;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod policy;
pub mod result;
pub mod traits;
pub mod vector_space;

pub use engine::{compute_similarity, SimilarityEngine};
pub use error::SimilarityError;
pub use policy::{NgramRange, ScorePolicy, SimilarityConfig};
pub use result::{Match, SimilarityResult};
