//! ClauseWise CLI: segment, classify, and risk-score legal document text.

mod render;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clausewise_ai::{Analyzer, AnalyzerOptions, ModelClassifier, ModelConfig};
use clausewise_core::{Segmenter, looks_like_legal_document, normalize};
use clausewise_store::{AnalysisRecord, FileStore};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "clausewise",
    version,
    about = "Legal document clause segmentation and risk scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a plain-text legal document
    Analyze {
        /// Path to the document text, or "-" for stdin
        path: String,

        /// Use the structural regex segmenter instead of the sentence-aware one
        #[arg(long)]
        structural: bool,

        /// Base URL of an OpenAI-compatible classification backend.
        /// Without it, the deterministic keyword classifier is used.
        #[arg(long)]
        backend_url: Option<String>,

        /// API key for the classification backend
        #[arg(long, env = "CLAUSEWISE_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Model identifier sent to the classification backend
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,

        /// Per-clause classification timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,

        /// Clauses classified concurrently
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// Emit the full analysis as JSON instead of the report card
        #[arg(long)]
        json: bool,

        /// Save the finalized analysis to the data directory
        #[arg(long)]
        save: bool,

        /// Document id used when saving (defaults to the file stem)
        #[arg(long)]
        id: Option<String>,

        #[arg(long, default_value = "clausewise-data")]
        data_dir: PathBuf,
    },

    /// Print a stored analysis
    Show {
        id: String,

        #[arg(long)]
        json: bool,

        #[arg(long, default_value = "clausewise-data")]
        data_dir: PathBuf,
    },

    /// List stored analyses
    List {
        #[arg(long, default_value = "clausewise-data")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            path,
            structural,
            backend_url,
            api_key,
            model,
            timeout_secs,
            concurrency,
            json,
            save,
            id,
            data_dir,
        } => {
            let text = read_input(&path)?;
            let text = normalize(&text);
            if text.is_empty() {
                anyhow::bail!("input document is empty");
            }
            if !looks_like_legal_document(&text) {
                warn!("input does not look like a legal document; results may be meaningless");
            }

            let mut analyzer = Analyzer::new().with_options(AnalyzerOptions {
                concurrency,
                timeout: Duration::from_secs(timeout_secs),
            });
            if structural {
                analyzer = analyzer.with_segmenter(Segmenter::structural());
            }
            if let Some(base_url) = backend_url {
                let api_key = api_key
                    .context("--api-key (or CLAUSEWISE_API_KEY) is required with --backend-url")?;
                analyzer = analyzer.with_backend(Box::new(ModelClassifier::new(ModelConfig {
                    base_url,
                    api_key,
                    model,
                })));
            }

            let analysis = analyzer.analyze(&text).await;

            if save {
                let document_id = id
                    .or_else(|| default_id(&path))
                    .context("--id is required when saving from stdin")?;
                let store = FileStore::open(&data_dir)?;
                store.save(&AnalysisRecord::new(
                    document_id.as_str(),
                    path.as_str(),
                    analysis.clone(),
                ))?;
                println!("saved analysis as {document_id}");
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                render::print_report(&path, &analysis);
            }
        }

        Command::Show { id, json, data_dir } => {
            let record = FileStore::open(&data_dir)?.load(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!(
                    "analyzed {} ({})",
                    record.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    record.source_name
                );
                render::print_report(&record.document_id, &record.analysis);
            }
        }

        Command::List { data_dir } => {
            for id in FileStore::open(&data_dir)?.list()? {
                println!("{id}");
            }
        }
    }

    Ok(())
}

/// Read document text from a file path or stdin ("-"). Upstream extraction
/// is out of scope: the input must already be plain text.
fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {path}"))
    }
}

fn default_id(path: &str) -> Option<String> {
    if path == "-" {
        return None;
    }
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
