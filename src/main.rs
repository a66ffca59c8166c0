use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use dupdetect::config::Config;
use dupdetect::export::ExportFormat;
use dupdetect::similarity::{SimilarityEngine, SimilarityReport};

/// dupdetect: flag duplicate and near-duplicate documents.
///
/// Extracts text from .txt, .docx and .pdf files and scores every pair for
/// textual similarity.
#[derive(Parser)]
#[command(name = "dupdetect", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a batch of documents and print the similarity matrix
    Compare {
        /// Files to compare (.txt, .docx, .pdf)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Flag pairs at or above this percentage (default: DUPDETECT_FLAG_THRESHOLD or 80)
        #[arg(long)]
        threshold: Option<f64>,

        /// Also write the matrix as an Excel workbook
        #[arg(long)]
        excel: Option<PathBuf>,

        /// Also write the matrix as a PDF report
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Serve the upload/download JSON API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "5000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dupdetect=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            files,
            threshold,
            excel,
            pdf,
            json,
        } => {
            let config = Config::load()?;
            let threshold = threshold.unwrap_or(config.flag_threshold);
            if !(0.0..=100.0).contains(&threshold) {
                anyhow::bail!("--threshold must be between 0 and 100, got {threshold}");
            }

            info!(files = files.len(), "Comparing documents");
            let engine = SimilarityEngine::new(config.matcher_options());
            let report = engine.compute(&files)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                dupdetect::output::terminal::display_matrix(&report, threshold);
                dupdetect::output::terminal::display_flagged_pairs(
                    &report.flagged_pairs(threshold),
                    threshold,
                );
            }

            if let Some(path) = excel {
                write_export(&report, ExportFormat::Excel, &path)?;
            }
            if let Some(path) = pdf {
                write_export(&report, ExportFormat::Pdf, &path)?;
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            dupdetect::web::run_server(config, port, &bind).await?;
        }
    }

    Ok(())
}

fn write_export(report: &SimilarityReport, format: ExportFormat, path: &Path) -> Result<()> {
    let bytes = format.render(report)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!(
        "{} {} report written to {}",
        "Saved".bold(),
        format.file_extension(),
        path.display()
    );
    Ok(())
}
