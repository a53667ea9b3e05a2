// Sentence normalization with a bounded memoization layer.
//
// Normalization turns a raw sentence into the comparison form used by the
// vectorizer: Unicode NFKD decomposition, every non-ASCII code point dropped
// (so "ă" folds to "a"), anything that is not a word character or whitespace
// removed, lower-cased, whitespace collapsed and trimmed.
//
// The same documents are compared against many others, so the same short
// sentences get normalized over and over. Short inputs go through a
// fixed-capacity LRU cache; long inputs bypass it to keep memory bounded.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use unicode_normalization::UnicodeNormalization;

/// Default number of cached normalizations.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Inputs with at least this many characters are never cached.
pub const DEFAULT_MAX_CACHED_LEN: usize = 1_000;

static SHARED: Lazy<Arc<Normalizer>> = Lazy::new(|| Arc::new(Normalizer::default()));

/// Normalize `text` through the process-wide shared cache.
pub fn normalize(text: &str) -> String {
    SHARED.normalize(text)
}

/// Handle to the process-wide normalizer, for engines that should share it.
pub fn shared() -> Arc<Normalizer> {
    Arc::clone(&SHARED)
}

/// The normalization function itself, without any caching.
pub fn normalize_uncached(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfkd() {
        // Combining marks and anything else outside ASCII are dropped
        if !c.is_ascii() {
            continue;
        }
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c.to_ascii_lowercase());
        }
    }

    out
}

/// Normalizer with a mutex-guarded LRU in front of [`normalize_uncached`].
///
/// Safe to share between threads. Eviction order only affects the hit rate,
/// never the output.
pub struct Normalizer {
    /// `None` when caching is disabled (capacity 0)
    cache: Option<Mutex<LruCache<String, String>>>,
    max_cached_len: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_CACHED_LEN)
    }
}

impl Normalizer {
    /// Create a normalizer caching up to `capacity` results for inputs
    /// shorter than `max_cached_len` characters. A capacity of 0 disables
    /// the cache entirely.
    pub fn new(capacity: usize, max_cached_len: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
            max_cached_len,
        }
    }

    /// Normalize `text`, consulting the cache for short inputs.
    pub fn normalize(&self, text: &str) -> String {
        let Some(cache) = &self.cache else {
            return normalize_uncached(text);
        };
        if text.chars().count() >= self.max_cached_len {
            return normalize_uncached(text);
        }

        if let Some(hit) = cache.lock().get(text) {
            return hit.clone();
        }

        // Computed outside the lock so concurrent callers don't serialize on it
        let normalized = normalize_uncached(text);
        cache.lock().put(text.to_string(), normalized.clone());
        normalized
    }

    /// Number of entries currently cached.
    pub fn cached_entries(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }
}
