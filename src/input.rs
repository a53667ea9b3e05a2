// Document loading for the CLI.
//
// A `.json` file must hold a JSON array of strings, one sentence per entry.
// Any other file is read as plain text and run through the sentence splitter.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::corpus::Document;
use crate::similarity::error::SimilarityError;
use crate::text::segment::split_sentences;

/// Load the sentences of one document.
pub fn load_sentences(path: &Path) -> Result<Vec<String>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_sentence_list(&content)
            .with_context(|| format!("Failed to load sentences from {}", path.display()))
    } else {
        Ok(split_sentences(&content))
    }
}

/// Load a document, titled by its file name.
pub fn load_document(path: &Path) -> Result<Document> {
    let title = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(Document {
        title,
        sentences: load_sentences(path)?,
    })
}

/// Parse a JSON array of strings. Anything else is rejected, never coerced.
pub fn parse_sentence_list(json: &str) -> Result<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(json).context("Invalid JSON")?;
    let serde_json::Value::Array(items) = value else {
        return Err(SimilarityError::InvalidInput(
            "expected a JSON array of sentences".to_string(),
        )
        .into());
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| -> Result<String> {
            match item {
                serde_json::Value::String(s) => Ok(s),
                other => Err(SimilarityError::InvalidInput(format!(
                    "entry {i} is not a string: {other}"
                ))
                .into()),
            }
        })
        .collect()
}
