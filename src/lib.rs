// sentmatch: sentence-level near-duplicate detection
//
// This is the library root. Text handling and similarity matching are the
// core; corpus comparison, input loading and output are the thin layers the
// CLI builds on.

pub mod config;
pub mod corpus;
pub mod input;
pub mod output;
pub mod similarity;
pub mod text;

pub use similarity::{compute_similarity, SimilarityEngine};
