// Unit tests for the similarity engine.
//
// Tests the documented behaviour of compute_similarity: empty-input
// short-circuits, self-similarity, threshold monotonicity, one-to-one
// exclusivity, ordering and truncation, and both aggregate score policies.

use sentmatch::similarity::vector_space::VectorSpace;
use sentmatch::similarity::{
    compute_similarity, NgramRange, ScorePolicy, SimilarityConfig, SimilarityEngine,
    SimilarityError,
};

const DOC: [&str; 6] = [
    "The committee approved the annual budget after a long debate",
    "Several members raised concerns about infrastructure spending",
    "The chairman promised a detailed report before the next session",
    "Public transport funding will increase by ten percent next year",
    "Opposition members voted against the proposal in the final round",
    "The meeting ended late in the evening without further incidents",
];

fn engine(config: SimilarityConfig) -> SimilarityEngine {
    SimilarityEngine::new(config).unwrap()
}

// ============================================================
// Degenerate inputs
// ============================================================

#[test]
fn empty_first_side_returns_zero_result() {
    let none: Vec<String> = vec![];
    let result = compute_similarity(&none, &DOC, 0.2, false, 20).unwrap();
    assert!(result.matches.is_empty());
    assert_eq!(result.overall_score, 0.0);
}

#[test]
fn empty_second_side_returns_zero_result() {
    let none: Vec<String> = vec![];
    let result = compute_similarity(&DOC, &none, 0.2, false, 20).unwrap();
    assert!(result.matches.is_empty());
    assert_eq!(result.overall_score, 0.0);
}

#[test]
fn everything_filtered_returns_zero_result() {
    let result = compute_similarity(&["too short", "nope"], &DOC, 0.2, false, 20).unwrap();
    assert!(result.matches.is_empty());
    assert_eq!(result.overall_score, 0.0);
}

#[test]
fn no_shared_vocabulary_returns_zero_result() {
    let numbers = ["1234 5678 9012 3456 7890", "2345 6789 0123 4567 8901"];
    let words = ["abcd efgh ijkl mnop qrst", "bcde fghi jklm nopq rstu"];
    let result = compute_similarity(&numbers, &words, 0.2, false, 20).unwrap();
    assert!(result.matches.is_empty());
    assert_eq!(result.overall_score, 0.0);
}

#[test]
fn invalid_arguments_are_rejected() {
    assert!(matches!(
        compute_similarity(&DOC, &DOC, -0.5, false, 20),
        Err(SimilarityError::InvalidInput(_))
    ));
    assert!(matches!(
        compute_similarity(&DOC, &DOC, 0.2, false, 0),
        Err(SimilarityError::InvalidInput(_))
    ));
}

// ============================================================
// Matching behaviour
// ============================================================

#[test]
fn single_identical_sentence() {
    let s = ["The quick brown fox jumps over the lazy dog today"];
    let result = compute_similarity(&s, &s, 0.2, false, 20).unwrap();
    assert_eq!(result.matches.len(), 1);
    assert!((result.matches[0].similarity_score - 1.0).abs() < 1e-9);
    assert!((result.overall_score - 100.0).abs() < 1e-6);

    let mean = engine(SimilarityConfig {
        score_policy: ScorePolicy::MeanOfMatches,
        ..Default::default()
    })
    .compare(&s, &s);
    assert!((mean.overall_score - 1.0).abs() < 1e-9);
}

#[test]
fn self_similarity_matches_every_sentence_to_itself() {
    let result = compute_similarity(&DOC, &DOC, 0.99, false, 20).unwrap();
    assert_eq!(result.matches.len(), DOC.len());
    for m in &result.matches {
        assert_eq!(m.sentence1, m.sentence2);
        assert_eq!(m.index1, m.index2);
        assert!((m.similarity_score - 1.0).abs() < 1e-9);
    }
    assert!((result.overall_score - 100.0).abs() < 1e-6);
}

#[test]
fn raising_threshold_never_adds_matches() {
    let edited = [
        "The committee approved the budget after a very long debate",
        "Some members raised serious concerns about spending",
        "The chairman promised a report before the next session",
        "Funding for public transport will rise next year",
        "The meeting ended late without incidents",
    ];
    let mut previous = usize::MAX;
    for step in 0..=10 {
        let threshold = step as f64 / 10.0;
        let count = compute_similarity(&DOC, &edited, threshold, false, 50)
            .unwrap()
            .matches
            .len();
        assert!(count <= previous, "threshold {threshold} produced more matches");
        previous = count;
    }
}

#[test]
fn one_to_one_never_reuses_a_target() {
    // Every source sentence is closest to the same single target
    let sources = [
        "The committee approved the annual budget after a long debate",
        "The committee approved the annual budget after a short debate",
        "The committee approved the annual budget after a heated debate",
    ];
    let targets = [
        "The committee approved the annual budget after a long debate",
        "Opposition members voted against the proposal in the final round",
    ];
    let config = SimilarityConfig {
        min_similarity: 0.0,
        one_to_one: true,
        ..Default::default()
    };
    let result = engine(config).compare(&sources, &targets);

    let mut used: Vec<usize> = result.matches.iter().map(|m| m.index2).collect();
    let before = used.len();
    used.sort_unstable();
    used.dedup();
    assert_eq!(used.len(), before, "a target sentence was matched twice");

    let greedy = compute_similarity(&sources, &targets, 0.0, false, 20).unwrap();
    assert!(greedy.matches.iter().all(|m| m.index2 == 0));
}

#[test]
fn results_sorted_and_bounded() {
    let edited = [
        "The committee approved the annual budget after a long debate",
        "Several members raised concerns about infrastructure",
        "The chairman promised a report",
        "Public transport funding will increase next year",
    ];
    for max_results in [1, 2, 3, 20] {
        let result = compute_similarity(&DOC, &edited, 0.1, false, max_results).unwrap();
        assert!(result.matches.len() <= max_results);
        for pair in result.matches.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
    }
}

#[test]
fn coverage_score_is_measured_before_truncation() {
    let config = SimilarityConfig {
        max_results: 2,
        ..Default::default()
    };
    let result = engine(config).compare(&DOC, &DOC);
    assert_eq!(result.matches.len(), 2);
    // All six sentences matched; truncation doesn't change coverage
    assert!((result.overall_score - 100.0).abs() < 1e-6);
}

#[test]
fn coverage_reflects_fraction_of_first_document() {
    let half = &DOC[..3];
    let result = compute_similarity(&DOC, half, 0.9, false, 20).unwrap();
    assert_eq!(result.matches.len(), 3);
    assert!((result.overall_score - 50.0).abs() < 1e-6, "got {}", result.overall_score);

    // From the other side every sentence is covered
    let reverse = compute_similarity(half, &DOC, 0.9, false, 20).unwrap();
    assert!((reverse.overall_score - 100.0).abs() < 1e-6);
}

#[test]
fn sentence_budget_limits_compared_sentences() {
    let config = SimilarityConfig {
        max_sentences_per_side: Some(3),
        ..Default::default()
    };
    let result = engine(config).compare(&DOC, &DOC);
    assert_eq!(result.sentences1, 3);
    assert_eq!(result.sentences2, 3);
    assert_eq!(result.matches.len(), 3);

    let paired = engine(SimilarityConfig {
        max_pairs: Some(4),
        ..Default::default()
    })
    .compare(&DOC, &DOC);
    assert!(paired.sentences1 * paired.sentences2 <= 4);
}

#[test]
fn match_indices_point_into_caller_input() {
    let first = ["x", "The committee approved the annual budget after a long debate"];
    let second = [
        "",
        "tiny",
        "The committee approved the annual budget after a long debate",
    ];
    let result = compute_similarity(&first, &second, 0.2, false, 20).unwrap();
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].index1, 1);
    assert_eq!(result.matches[0].index2, 2);
}

// ============================================================
// Vector space
// ============================================================

#[test]
fn higher_ngram_order_grows_vocabulary() {
    let a = ["the committee approved the annual budget"];
    let b = ["the committee rejected the annual budget"];
    let small = VectorSpace::build(&a, &b, NgramRange { min: 1, max: 1 }, 5_000).unwrap();
    let large = VectorSpace::build(&a, &b, NgramRange { min: 1, max: 4 }, 5_000).unwrap();
    assert!(large.vocabulary().len() > small.vocabulary().len());
    assert_eq!(small.matrix1().len(), 1);
    assert_eq!(small.matrix2().len(), 1);
}

#[test]
fn vocabulary_cap_is_respected() {
    let space = VectorSpace::build(&DOC, &DOC, NgramRange { min: 1, max: 2 }, 10).unwrap();
    assert_eq!(space.vocabulary().len(), 10);
}
