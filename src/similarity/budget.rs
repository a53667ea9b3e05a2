// Sentence budget: bound the cost of one comparison.
//
// Building the space and the pairwise similarity matrix is O(n * m * v), so
// very long documents are cut down to a representative subset before
// vectorizing. The most informative sentences (most words, then longest)
// survive; their original order is restored afterwards.

use tracing::info;

use crate::text::preprocess::SentenceSlice;

/// Apply the per-side cap and the pair ceiling to both slices.
pub fn apply(
    slice1: SentenceSlice,
    slice2: SentenceSlice,
    max_per_side: Option<usize>,
    max_pairs: Option<usize>,
) -> (SentenceSlice, SentenceSlice) {
    let (mut n, mut m) = (slice1.len(), slice2.len());
    if let Some(cap) = max_per_side {
        n = n.min(cap);
        m = m.min(cap);
    }
    if let Some(ceiling) = max_pairs {
        (n, m) = fit_pairs(n, m, ceiling);
    }

    (limit(slice1, n, "first"), limit(slice2, m, "second"))
}

/// Shrink `(n, m)` until `n * m <= ceiling`, cutting the larger side first.
fn fit_pairs(n: usize, m: usize, ceiling: usize) -> (usize, usize) {
    if n.saturating_mul(m) <= ceiling {
        return (n, m);
    }
    let small = n.min(m);
    let (small, large) = if small.saturating_mul(small) > ceiling {
        let side = (ceiling as f64).sqrt().floor().max(1.0) as usize;
        (side, side)
    } else {
        (small, (ceiling / small).max(1))
    };
    if n <= m {
        (small, large)
    } else {
        (large, small)
    }
}

/// Keep the `keep` most informative sentences of `slice`, in input order.
pub fn limit(slice: SentenceSlice, keep: usize, side: &str) -> SentenceSlice {
    if slice.len() <= keep {
        return slice;
    }

    let mut ranked: Vec<usize> = (0..slice.len()).collect();
    // Stable sort: earlier sentences win ties
    ranked.sort_by(|&a, &b| {
        let words_a = slice.normalized[a].split_whitespace().count();
        let words_b = slice.normalized[b].split_whitespace().count();
        words_b
            .cmp(&words_a)
            .then_with(|| slice.raw[b].chars().count().cmp(&slice.raw[a].chars().count()))
    });
    ranked.truncate(keep);
    ranked.sort_unstable();

    info!(
        side,
        from = slice.len(),
        to = keep,
        "Limiting document to its most informative sentences"
    );

    slice.select(&ranked)
}
