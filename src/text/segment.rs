// Sentence splitting for plain-text documents.
//
// The engine itself only ever sees lists of sentences. This is the simple
// splitter used when a caller hands over a whole document: break after runs
// of terminal punctuation followed by whitespace, and on blank lines.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static SENTENCE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]+(?:\s+|$)|\n[ \t]*\n").expect("sentence break pattern is valid")
});

/// Split `text` into trimmed, non-empty sentences. Terminal punctuation is
/// dropped along with the break.
pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_terminal_punctuation() {
        let sentences = split_sentences("First one. Second one!  Third one?Fourth");
        assert_eq!(sentences, vec!["First one", "Second one", "Third one?Fourth"]);
    }

    #[test]
    fn test_keeps_decimal_numbers_together() {
        let sentences = split_sentences("Pi is roughly 3.14 in most cases. Done.");
        assert_eq!(sentences, vec!["Pi is roughly 3.14 in most cases", "Done"]);
    }

    #[test]
    fn test_splits_on_blank_lines() {
        let sentences = split_sentences("A heading\n\nBody text follows here.\n");
        assert_eq!(sentences, vec!["A heading", "Body text follows here"]);
    }

    #[test]
    fn test_drops_empty_pieces() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences(" ... !!! ").is_empty());
    }
}
