// Colored terminal output for comparison results and corpus reports.
//
// This module handles all terminal-specific formatting: colors, tables,
// score bars. main.rs delegates here unless JSON output was requested.

use colored::Colorize;

use crate::corpus::CorpusReport;
use crate::similarity::policy::ScorePolicy;
use crate::similarity::result::SimilarityResult;

/// Width of the sentence previews in match listings.
const PREVIEW_CHARS: usize = 100;

/// Display the matches and aggregate score of one comparison.
pub fn display_comparison(left: &str, right: &str, result: &SimilarityResult) {
    println!(
        "\n{}",
        format!("=== {} vs {} ===", left, right).bold()
    );
    println!(
        "  Sentences compared: {} / {}",
        result.sentences1, result.sentences2
    );
    println!(
        "  Overall similarity: {}  {}",
        colorize_score(result.overall_score, result.policy),
        score_bar(result.normalized_score())
    );
    println!();

    if result.matches.is_empty() {
        println!("  No similar sentences found.");
        return;
    }

    println!(
        "  {:>4}  {:>6}  {}",
        "#".dimmed(),
        "Sim".dimmed(),
        "Sentences".dimmed()
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, m) in result.matches.iter().enumerate() {
        println!(
            "  {:>4}. {:>6.3}  [{}] {}",
            i + 1,
            m.similarity_score,
            m.index1 + 1,
            super::truncate_chars(&m.sentence1, PREVIEW_CHARS)
        );
        println!(
            "  {:>13}[{}] {}",
            "",
            m.index2 + 1,
            super::truncate_chars(&m.sentence2, PREVIEW_CHARS).dimmed()
        );
    }
    println!();
}

/// Display a corpus report: one line per matching document, then the best
/// matches of the top document.
pub fn display_corpus_report(query: &str, report: &CorpusReport, policy: ScorePolicy) {
    println!(
        "\n{}",
        format!(
            "=== {} against {} documents ===",
            query, report.compared
        )
        .bold()
    );
    println!();

    if report.documents.is_empty() {
        println!("  No similar documents found.");
        return;
    }

    for (i, doc) in report.documents.iter().enumerate() {
        println!(
            "  {:>3}. {:<40} {:>9}  {} matches",
            i + 1,
            doc.title,
            colorize_score(doc.overall_score, policy),
            doc.matches.len()
        );
    }
    println!();
    println!(
        "  Overall similarity: {}",
        colorize_score(report.overall_similarity, policy)
    );

    if let Some(top) = report.documents.first() {
        println!("\n  Closest matches in {}:", top.title.bold());
        for m in top.matches.iter().take(5) {
            println!(
                "    [{:.3}] {}",
                m.similarity_score,
                super::truncate_chars(&m.sentence1, PREVIEW_CHARS).dimmed()
            );
        }
    }
    println!();
}

/// Format a score on its policy's scale and color it by severity.
fn colorize_score(score: f64, policy: ScorePolicy) -> colored::ColoredString {
    let text = match policy {
        ScorePolicy::Coverage => format!("{score:.1}%"),
        ScorePolicy::MeanOfMatches => format!("{score:.3}"),
    };
    let fraction = score / policy.scale();
    if fraction >= 0.5 {
        text.red().bold()
    } else if fraction >= 0.2 {
        text.yellow()
    } else {
        text.green()
    }
}

/// Render a 0-1 fraction as a fixed-width bar.
fn score_bar(fraction: f64) -> String {
    let bar_width: usize = 20;
    let filled = (fraction.clamp(0.0, 1.0) * bar_width as f64).round() as usize;
    let empty = bar_width.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}
