// Corpus comparison: one document against many.
//
// This is the plagiarism-check workflow. A newly submitted document is
// compared against every stored document; documents with at least one
// matching sentence are reported, most similar first, and the highest
// aggregate score becomes the overall similarity of the submission.
//
// The stored document is the first side of each comparison and the
// submission the second, so under the coverage policy a document's score
// says how much of that stored document reappears in the submission.

use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::similarity::result::Match;
use crate::similarity::traits::SentenceMatcher;

/// A named document from the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub sentences: Vec<String>,
}

/// Matches between the submission and one corpus document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMatch {
    pub title: String,
    pub overall_score: f64,
    pub matches: Vec<Match>,
}

/// Outcome of comparing a submission against a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusReport {
    /// Documents with at least one match, highest score first
    pub documents: Vec<DocumentMatch>,
    /// Highest `overall_score` among `documents`, 0 when nothing matched
    pub overall_similarity: f64,
    /// Number of corpus documents compared
    pub compared: usize,
}

/// Compare `query` against every document in `corpus`, in parallel.
///
/// Each corpus document is the first side and `query` the second, so
/// `Match::sentence1` comes from the stored document.
///
/// Ties on score are ordered by title so the report is deterministic.
pub fn compare_corpus<M>(
    matcher: &M,
    query: &[String],
    corpus: &[Document],
    progress: Option<&ProgressBar>,
) -> CorpusReport
where
    M: SentenceMatcher + ?Sized,
{
    let mut documents: Vec<DocumentMatch> = corpus
        .par_iter()
        .filter_map(|doc| {
            let result = matcher.compare_sentences(&doc.sentences, query);
            if let Some(pb) = progress {
                pb.inc(1);
            }
            if result.matches.is_empty() {
                return None;
            }
            Some(DocumentMatch {
                title: doc.title.clone(),
                overall_score: result.overall_score,
                matches: result.matches,
            })
        })
        .collect();

    documents.sort_by(|a, b| {
        b.overall_score
            .total_cmp(&a.overall_score)
            .then_with(|| a.title.cmp(&b.title))
    });

    let overall_similarity = documents.first().map_or(0.0, |d| d.overall_score);

    info!(
        compared = corpus.len(),
        matched = documents.len(),
        overall_similarity,
        "Corpus comparison finished"
    );

    CorpusReport {
        documents,
        overall_similarity,
        compared: corpus.len(),
    }
}
