use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::similarity::policy::{NgramRange, ScorePolicy, SimilarityConfig};

/// Central configuration loaded from environment variables.
///
/// Every knob is optional and falls back to the engine defaults. The .env
/// file is loaded at startup via dotenvy; CLI flags override what's loaded
/// here.
pub struct Config {
    pub similarity: SimilarityConfig,
}

impl Config {
    /// Load configuration from `SENTMATCH_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup, so tests don't have
    /// to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut similarity = SimilarityConfig::default();

        if let Some(v) = parse_var::<f64, _>(&lookup, "SENTMATCH_MIN_SIMILARITY")? {
            similarity.min_similarity = v;
        }
        if let Some(v) = lookup("SENTMATCH_ONE_TO_ONE") {
            similarity.one_to_one = parse_bool(&v)
                .with_context(|| format!("SENTMATCH_ONE_TO_ONE has invalid value '{v}'"))?;
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "SENTMATCH_MAX_RESULTS")? {
            similarity.max_results = v;
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "SENTMATCH_MIN_LENGTH")? {
            similarity.min_length = v;
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "SENTMATCH_NGRAM_MAX")? {
            similarity.ngram_range = NgramRange { min: 1, max: v };
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "SENTMATCH_MAX_FEATURES")? {
            similarity.max_features = v;
        }
        if let Some(v) = lookup("SENTMATCH_SCORE_POLICY") {
            similarity.score_policy = v.parse::<ScorePolicy>().map_err(anyhow::Error::msg)?;
        }
        if let Some(v) = parse_var::<usize, _>(&lookup, "SENTMATCH_MAX_SENTENCES")? {
            similarity.max_sentences_per_side = Some(v);
        }

        similarity
            .validate()
            .context("Invalid SENTMATCH_* configuration")?;

        Ok(Self { similarity })
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{key} has invalid value '{raw}'")),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => anyhow::bail!("expected true or false"),
    }
}
