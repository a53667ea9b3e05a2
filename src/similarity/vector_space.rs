// Joint TF-IDF vector space for one comparison.
//
// Both sides of a comparison are vectorized together so that every term owns
// the same column on both sides. The "document" for IDF purposes is a single
// sentence, not the whole input document: a phrase that appears in many
// sentences of the pair is downweighted, a phrase shared by just one sentence
// on each side is what makes those two sentences stand out as duplicates.
//
// A space is built fresh for every call and dropped with it. Sharing one
// vocabulary across different document pairs would leak term statistics
// between unrelated comparisons.

use std::collections::HashMap;

use super::error::SimilarityError;
use super::policy::NgramRange;

/// Sparse row: `(column, weight)` pairs sorted by column.
pub type SparseVector = Vec<(usize, f64)>;

/// Tokens shorter than this are ignored when building terms.
const MIN_TOKEN_LEN: usize = 2;

/// TF-IDF matrices for the two sides of a comparison.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: Vec<String>,
    idf: Vec<f64>,
    rows1: Vec<SparseVector>,
    rows2: Vec<SparseVector>,
}

impl VectorSpace {
    /// Build the joint space over two lists of normalized sentences.
    ///
    /// The vocabulary is capped at `max_features` terms, keeping the ones with
    /// the highest total frequency over the joint corpus (ties broken by term
    /// text), so the cap doesn't depend on which side is larger. Columns are
    /// assigned in sorted term order.
    pub fn build<S: AsRef<str>>(
        normalized1: &[S],
        normalized2: &[S],
        ngram_range: NgramRange,
        max_features: usize,
    ) -> Result<Self, SimilarityError> {
        let docs: Vec<HashMap<String, u32>> = normalized1
            .iter()
            .chain(normalized2)
            .map(|s| count_terms(s.as_ref(), ngram_range))
            .collect();

        // term -> (total frequency, document frequency)
        let mut stats: HashMap<&str, (u32, u32)> = HashMap::new();
        for doc in &docs {
            for (term, count) in doc {
                let entry = stats.entry(term.as_str()).or_default();
                entry.0 += count;
                entry.1 += 1;
            }
        }

        if stats.is_empty() {
            return Err(SimilarityError::EmptyVocabulary);
        }

        let mut ranked: Vec<(&str, u32, u32)> = stats
            .into_iter()
            .map(|(term, (total, df))| (term, total, df))
            .collect();
        if ranked.len() > max_features {
            ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            ranked.truncate(max_features);
        }
        ranked.sort_by(|a, b| a.0.cmp(b.0));

        // Smoothed IDF: as if one extra sentence contained every term once
        let n = docs.len() as f64;
        let idf: Vec<f64> = ranked
            .iter()
            .map(|&(_, _, df)| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();
        let columns: HashMap<&str, usize> = ranked
            .iter()
            .enumerate()
            .map(|(col, &(term, _, _))| (term, col))
            .collect();

        let mut rows: Vec<SparseVector> = docs
            .iter()
            .map(|doc| weigh_row(doc, &columns, &idf))
            .collect();
        let rows2 = rows.split_off(normalized1.len());

        let vocabulary = ranked.iter().map(|&(term, _, _)| term.to_string()).collect();

        Ok(Self {
            vocabulary,
            idf,
            rows1: rows,
            rows2,
        })
    }

    /// Terms in column order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// IDF weight of each column.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Rows for the first side, one per sentence.
    pub fn matrix1(&self) -> &[SparseVector] {
        &self.rows1
    }

    /// Rows for the second side, one per sentence.
    pub fn matrix2(&self) -> &[SparseVector] {
        &self.rows2
    }

    /// Column of `term`, if it made it into the vocabulary.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|t| t.as_str().cmp(term))
            .ok()
    }
}

/// Terms of one normalized sentence: every n-gram of consecutive tokens for
/// each order in `ngram_range`, joined with single spaces.
pub fn terms(normalized: &str, ngram_range: NgramRange) -> Vec<String> {
    let tokens: Vec<&str> = normalized
        .split_whitespace()
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .collect();

    let mut out = Vec::new();
    for n in ngram_range.min..=ngram_range.max.min(tokens.len()) {
        if n == 0 {
            continue;
        }
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}

/// Cosine similarity of two sparse rows. A zero vector scores 0 against
/// anything.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    // Both rows are sorted by column: merge-join
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }

    // Rounding can push identical rows a hair above 1
    (dot / (norm_a * norm_b)).min(1.0)
}

fn count_terms(normalized: &str, ngram_range: NgramRange) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for term in terms(normalized, ngram_range) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

/// Raw count times IDF for every in-vocabulary term, L2-normalized.
fn weigh_row(
    doc: &HashMap<String, u32>,
    columns: &HashMap<&str, usize>,
    idf: &[f64],
) -> SparseVector {
    let mut row: SparseVector = doc
        .iter()
        .filter_map(|(term, &count)| {
            columns
                .get(term.as_str())
                .map(|&col| (col, count as f64 * idf[col]))
        })
        .collect();
    row.sort_by_key(|&(col, _)| col);

    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in &mut row {
            *w /= norm;
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIGRAMS: NgramRange = NgramRange { min: 1, max: 1 };

    #[test]
    fn test_terms_unigrams_and_bigrams() {
        let t = terms("the quick brown fox", NgramRange::default());
        assert_eq!(
            t,
            vec![
                "the", "quick", "brown", "fox", "the quick", "quick brown", "brown fox"
            ]
        );
    }

    #[test]
    fn test_terms_skip_single_char_tokens() {
        assert_eq!(terms("a cat b dog", UNIGRAMS), vec!["cat", "dog"]);
        // The bigram is built after filtering
        assert_eq!(
            terms("a cat b dog", NgramRange { min: 2, max: 2 }),
            vec!["cat dog"]
        );
    }

    #[test]
    fn test_terms_stop_at_sentence_length() {
        let sentence = "one two three four";
        let exact = terms(sentence, NgramRange { min: 1, max: 4 });
        assert_eq!(terms(sentence, NgramRange { min: 1, max: usize::MAX }), exact);
        assert!(terms(sentence, NgramRange { min: 5, max: usize::MAX }).is_empty());

        let space = VectorSpace::build(
            &[sentence],
            &["four five six"],
            NgramRange { min: 1, max: usize::MAX },
            100,
        )
        .unwrap();
        // 10 n-grams of the first sentence + 6 of the second, "four" shared
        assert_eq!(space.vocabulary().len(), 15);
    }

    #[test]
    fn test_columns_shared_between_sides() {
        let space = VectorSpace::build(
            &["red apples grow here"],
            &["green apples grow there"],
            UNIGRAMS,
            100,
        )
        .unwrap();
        let apples = space.column("apples").unwrap();
        assert!(space.matrix1()[0].iter().any(|&(c, _)| c == apples));
        assert!(space.matrix2()[0].iter().any(|&(c, _)| c == apples));
        assert_eq!(space.vocabulary().len(), 6);
    }

    #[test]
    fn test_idf_downweights_common_terms() {
        let space = VectorSpace::build(
            &["shared term alpha", "shared term beta"],
            &["shared term gamma"],
            UNIGRAMS,
            100,
        )
        .unwrap();
        let shared = space.idf()[space.column("shared").unwrap()];
        let alpha = space.idf()[space.column("alpha").unwrap()];
        assert!((shared - 1.0).abs() < 1e-12, "term in every sentence has idf 1");
        assert!(alpha > shared);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let space = VectorSpace::build(
            &["one two three four"],
            &["four five six seven", "eight nine ten eleven"],
            NgramRange::default(),
            100,
        )
        .unwrap();
        for row in space.matrix1().iter().chain(space.matrix2()) {
            let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vocabulary_cap_keeps_most_frequent() {
        let space = VectorSpace::build(
            &["common common rare1"],
            &["common rare2 rare3"],
            UNIGRAMS,
            2,
        )
        .unwrap();
        // "common" appears three times; ties among the rare terms break by text
        assert_eq!(space.vocabulary(), &["common".to_string(), "rare1".to_string()]);
    }

    #[test]
    fn test_vocabulary_cap_independent_of_side() {
        let a = ["alpha beta gamma", "alpha delta epsilon"];
        let b = ["alpha beta zeta"];
        let forward = VectorSpace::build(&a, &b, UNIGRAMS, 3).unwrap();
        let backward = VectorSpace::build(&b, &a, UNIGRAMS, 3).unwrap();
        assert_eq!(forward.vocabulary(), backward.vocabulary());
    }

    #[test]
    fn test_empty_vocabulary_is_an_error() {
        let result = VectorSpace::build(&["a b c"], &["x y z"], NgramRange::default(), 100);
        assert_eq!(result.unwrap_err(), SimilarityError::EmptyVocabulary);
    }

    #[test]
    fn test_cosine_edge_cases() {
        let a: SparseVector = vec![(0, 1.0), (2, 1.0)];
        let zero: SparseVector = vec![];
        assert_eq!(cosine(&a, &zero), 0.0);
        assert!((cosine(&a, &a) - 1.0).abs() < 1e-12);
        assert_eq!(cosine(&a, &vec![(1, 3.0)]), 0.0);
    }
}
