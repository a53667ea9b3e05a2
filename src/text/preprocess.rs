// Sentence preprocessing: drop noise before any vector work happens.
//
// A sentence survives only if its trimmed form is at least `min_length`
// characters long and its normalized form still has three or more words.
// Everything else (headings, list bullets, page numbers, stray fragments from
// the caller's splitter) is discarded here.

use super::normalize::Normalizer;

/// Default minimum trimmed sentence length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 20;

/// Minimum number of whitespace-delimited tokens in the normalized form.
pub const MIN_TOKENS: usize = 3;

/// One side of a comparison after preprocessing.
///
/// The three vectors are index-aligned: `normalized[i]` is the normalization
/// of `raw[i]`, and `positions[i]` is where `raw[i]` sat in the caller's input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentenceSlice {
    /// Trimmed original sentences, used for display
    pub raw: Vec<String>,
    /// Comparison form, used only for vectorization
    pub normalized: Vec<String>,
    /// Index of each kept sentence in the input sequence
    pub positions: Vec<usize>,
}

impl SentenceSlice {
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Keep only the entries at the given slice indices (ascending).
    pub fn select(&self, indices: &[usize]) -> SentenceSlice {
        SentenceSlice {
            raw: indices.iter().map(|&i| self.raw[i].clone()).collect(),
            normalized: indices.iter().map(|&i| self.normalized[i].clone()).collect(),
            positions: indices.iter().map(|&i| self.positions[i]).collect(),
        }
    }
}

/// Filter and normalize `sentences`, preserving input order.
///
/// An empty result is a valid outcome; the engine turns it into the
/// zero-match result.
pub fn preprocess<S: AsRef<str>>(
    sentences: &[S],
    min_length: usize,
    normalizer: &Normalizer,
) -> SentenceSlice {
    let mut slice = SentenceSlice::default();

    for (position, sentence) in sentences.iter().enumerate() {
        let trimmed = sentence.as_ref().trim();
        if trimmed.chars().count() < min_length {
            continue;
        }

        let normalized = normalizer.normalize(trimmed);
        if normalized.split_whitespace().count() < MIN_TOKENS {
            continue;
        }

        slice.raw.push(trimmed.to_string());
        slice.normalized.push(normalized);
        slice.positions.push(position);
    }

    slice
}
