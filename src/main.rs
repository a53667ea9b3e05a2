use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use sentmatch::config::Config;
use sentmatch::similarity::{NgramRange, ScorePolicy, SimilarityConfig, SimilarityEngine};

/// sentmatch: sentence-level near-duplicate detection.
///
/// Finds the sentences two documents share (verbatim or lightly edited) and
/// scores how much of one document is duplicated in the other.
#[derive(Parser)]
#[command(name = "sentmatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two documents sentence by sentence
    Compare {
        /// First document (.json array of sentences, or plain text)
        first: PathBuf,

        /// Second document
        second: PathBuf,

        #[command(flatten)]
        matching: MatchArgs,
    },

    /// Compare one document against a corpus of documents
    Corpus {
        /// The document to check
        query: PathBuf,

        /// Corpus documents to check it against
        #[arg(required = true)]
        documents: Vec<PathBuf>,

        #[command(flatten)]
        matching: MatchArgs,
    },
}

/// Matching knobs. Anything left unset keeps the value from the environment
/// (SENTMATCH_*) or the built-in default.
#[derive(Args)]
struct MatchArgs {
    /// Minimum cosine similarity for a sentence pair to match (0-1)
    #[arg(long)]
    min_similarity: Option<f64>,

    /// Never match a sentence of the second document more than once
    #[arg(long)]
    one_to_one: bool,

    /// Maximum number of matches to report per comparison
    #[arg(long)]
    max_results: Option<usize>,

    /// Minimum sentence length in characters
    #[arg(long)]
    min_length: Option<usize>,

    /// Highest n-gram order used for terms, 1 to 8 (1 = words only)
    #[arg(long)]
    ngram_max: Option<usize>,

    /// Vocabulary cap per comparison
    #[arg(long)]
    max_features: Option<usize>,

    /// Aggregate score formula: coverage (0-100) or mean (0-1)
    #[arg(long)]
    policy: Option<ScorePolicy>,

    /// Only pair sentences whose length ratio exceeds this value (0-1)
    #[arg(long)]
    min_length_ratio: Option<f64>,

    /// Print JSON instead of the colored report
    #[arg(long)]
    json: bool,
}

impl MatchArgs {
    /// Apply the flags that were given on top of `base`.
    fn apply(&self, mut base: SimilarityConfig) -> SimilarityConfig {
        if let Some(v) = self.min_similarity {
            base.min_similarity = v;
        }
        if self.one_to_one {
            base.one_to_one = true;
        }
        if let Some(v) = self.max_results {
            base.max_results = v;
        }
        if let Some(v) = self.min_length {
            base.min_length = v;
        }
        if let Some(v) = self.ngram_max {
            base.ngram_range = NgramRange { min: 1, max: v };
        }
        if let Some(v) = self.max_features {
            base.max_features = v;
        }
        if let Some(v) = self.policy {
            base.score_policy = v;
        }
        if self.min_length_ratio.is_some() {
            base.min_length_ratio = self.min_length_ratio;
        }
        base
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sentmatch=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            first,
            second,
            matching,
        } => {
            let config = Config::load()?;
            let engine = SimilarityEngine::new(matching.apply(config.similarity))?;

            let sentences1 = sentmatch::input::load_sentences(&first)?;
            let sentences2 = sentmatch::input::load_sentences(&second)?;
            info!(
                first = sentences1.len(),
                second = sentences2.len(),
                "Loaded documents"
            );

            let result = engine.compare(&sentences1, &sentences2);

            if matching.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                sentmatch::output::terminal::display_comparison(
                    &first.display().to_string(),
                    &second.display().to_string(),
                    &result,
                );
            }
        }

        Commands::Corpus {
            query,
            documents,
            matching,
        } => {
            let config = Config::load()?;
            let engine = SimilarityEngine::new(matching.apply(config.similarity))?;
            let policy = engine.config().score_policy;

            let query_sentences = sentmatch::input::load_sentences(&query)?;
            let corpus = documents
                .iter()
                .map(|path| sentmatch::input::load_document(path))
                .collect::<Result<Vec<_>>>()?;

            let pb = if matching.json {
                ProgressBar::hidden()
            } else {
                let pb = ProgressBar::new(corpus.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("  Comparing [{bar:30}] {pos}/{len} documents")
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                pb
            };

            let report =
                sentmatch::corpus::compare_corpus(&engine, &query_sentences, &corpus, Some(&pb));
            pb.finish_and_clear();

            if matching.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                sentmatch::output::terminal::display_corpus_report(
                    &query.display().to_string(),
                    &report,
                    policy,
                );
            }
        }
    }

    Ok(())
}
