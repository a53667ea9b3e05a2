// Match extraction: from a vector space to a ranked list of duplicates.
//
// Every sentence of the first document picks its single best counterpart in
// the second document, provided the pair clears the similarity threshold.
// One match per source sentence keeps a repetitive document from producing a
// quadratic pile of near-identical matches.
//
// With `one_to_one` set, a counterpart claimed by an earlier sentence is off
// the table for later ones; those fall back to their next best eligible
// counterpart or drop out. Earlier sentences always win.

use rayon::prelude::*;

use super::error::SimilarityError;
use super::policy::{ScorePolicy, SimilarityConfig};
use super::result::{Match, SimilarityResult};
use super::vector_space::{cosine, VectorSpace};
use crate::text::preprocess::SentenceSlice;

/// Full `n x m` cosine similarity matrix between the two sides of `space`.
///
/// Rows are computed in parallel. Any non-finite entry is reported as an
/// error rather than silently ranked.
pub fn similarity_matrix(space: &VectorSpace) -> Result<Vec<Vec<f64>>, SimilarityError> {
    let matrix: Vec<Vec<f64>> = space
        .matrix1()
        .par_iter()
        .map(|row| space.matrix2().iter().map(|col| cosine(row, col)).collect())
        .collect();

    for (row, scores) in matrix.iter().enumerate() {
        if let Some(col) = scores.iter().position(|s| !s.is_finite()) {
            return Err(SimilarityError::NonFinite { row, col });
        }
    }
    Ok(matrix)
}

/// Pick matches, rank them, truncate and compute the aggregate score.
///
/// `slice1` and `slice2` must be the slices `space` was built from.
pub fn extract(
    slice1: &SentenceSlice,
    slice2: &SentenceSlice,
    space: &VectorSpace,
    config: &SimilarityConfig,
) -> Result<SimilarityResult, SimilarityError> {
    let matrix = similarity_matrix(space)?;
    let lengths1: Vec<usize> = slice1.raw.iter().map(|s| s.chars().count()).collect();
    let lengths2: Vec<usize> = slice2.raw.iter().map(|s| s.chars().count()).collect();

    let mut claimed = vec![false; slice2.len()];
    let mut matches = Vec::new();

    for (i, scores) in matrix.iter().enumerate() {
        let mut best: Option<(usize, f64)> = None;
        for (j, &score) in scores.iter().enumerate() {
            // Zero similarity is never a match, even at threshold 0
            if score <= 0.0 || score < config.min_similarity {
                continue;
            }
            if config.one_to_one && claimed[j] {
                continue;
            }
            if let Some(ratio) = config.min_length_ratio {
                if length_ratio(lengths1[i], lengths2[j]) <= ratio {
                    continue;
                }
            }
            // Strictly greater: the lowest index wins ties
            match best {
                Some((_, b)) if score <= b => {}
                _ => best = Some((j, score)),
            }
        }

        if let Some((j, score)) = best {
            claimed[j] = true;
            matches.push(Match {
                sentence1: slice1.raw[i].clone(),
                sentence2: slice2.raw[j].clone(),
                similarity_score: score,
                index1: slice1.positions[i],
                index2: slice2.positions[j],
            });
        }
    }

    // Coverage is measured before truncation drops anything
    let matched = matches.len();
    let total: f64 = matches.iter().map(|m| m.similarity_score).sum();

    // Stable: ties stay in first-document order
    matches.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
    matches.truncate(config.max_results);

    let overall_score = match config.score_policy {
        ScorePolicy::Coverage => coverage_score(matched, slice1.len(), total),
        ScorePolicy::MeanOfMatches => mean_score(&matches),
    };

    Ok(SimilarityResult {
        matches,
        overall_score,
        policy: config.score_policy,
        sentences1: slice1.len(),
        sentences2: slice2.len(),
    })
}

/// `(matched / sentences) * (total / matched)` as a percentage.
fn coverage_score(matched: usize, sentences: usize, total: f64) -> f64 {
    if matched == 0 || sentences == 0 {
        return 0.0;
    }
    let coverage = matched as f64 / sentences as f64;
    let mean = total / matched as f64;
    coverage * mean * 100.0
}

fn mean_score(matches: &[Match]) -> f64 {
    if matches.is_empty() {
        return 0.0;
    }
    matches.iter().map(|m| m.similarity_score).sum::<f64>() / matches.len() as f64
}

fn length_ratio(a: usize, b: usize) -> f64 {
    let longer = a.max(b);
    if longer == 0 {
        return 0.0;
    }
    a.min(b) as f64 / longer as f64
}
