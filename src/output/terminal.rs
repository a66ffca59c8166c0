// Colored terminal output for similarity matrices and flagged pairs.

use colored::Colorize;

use crate::similarity::{FlaggedPair, SimilarityReport};

/// Widest filename column shown before truncation.
const NAME_WIDTH: usize = 24;
/// Column headers are shortened harder so wide matrices still fit.
const HEADER_WIDTH: usize = 10;

/// Print the full matrix with filenames as row and column headers.
pub fn display_matrix(report: &SimilarityReport, threshold: f64) {
    if report.files.is_empty() {
        println!("No documents compared.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Similarity Matrix ({} files) ===", report.files.len()).bold()
    );
    println!();

    // Header row
    let mut header = format!("  {:<NAME_WIDTH$}", "File".dimmed());
    for name in &report.files {
        let short = super::truncate_chars(name, HEADER_WIDTH - 3);
        header.push_str(&format!(" {:>HEADER_WIDTH$}", short.dimmed()));
    }
    println!("{header}");
    println!(
        "  {}",
        "-".repeat(NAME_WIDTH + (HEADER_WIDTH + 1) * report.files.len()).dimmed()
    );

    for (i, row) in report.matrix.rows().iter().enumerate() {
        let name = super::truncate_chars(&report.files[i], NAME_WIDTH - 3);
        let mut line = format!("  {name:<NAME_WIDTH$}");
        for (j, &score) in row.iter().enumerate() {
            let cell = format!("{score:>HEADER_WIDTH$.2}");
            let colored_cell = if i == j {
                cell.dimmed()
            } else {
                colorize_score(&cell, score, threshold)
            };
            line.push_str(&format!(" {colored_cell}"));
        }
        println!("{line}");
    }
    println!();
}

/// Print the pairs at or above the threshold, most similar first.
pub fn display_flagged_pairs(pairs: &[FlaggedPair], threshold: f64) {
    if pairs.is_empty() {
        println!(
            "  {} No pairs at or above {threshold:.1}%",
            "ok".green().bold()
        );
        return;
    }

    println!(
        "{}",
        format!("=== Likely duplicates (>= {threshold:.1}%) ===").bold()
    );
    for pair in pairs {
        println!(
            "  {} {:>6.2}%  {}  <->  {}",
            "!!".red().bold(),
            pair.score,
            pair.left,
            pair.right
        );
    }
    println!();
}

/// Red at or above the threshold, yellow above half of it, green below.
fn colorize_score(cell: &str, score: f64, threshold: f64) -> colored::ColoredString {
    if score >= threshold {
        cell.red().bold()
    } else if score >= threshold / 2.0 {
        cell.yellow()
    } else {
        cell.green()
    }
}
