use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use motor_core::config::{DEFAULT_CORPUS_DIR, DEFAULT_EXTENSION, DEFAULT_SNAPSHOT};
use motor_core::startup::build_and_save;
use motor_core::{open_or_build, EngineConfig, SearchEngine, Startup};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and query a TF-IDF inverted index over a folder of text files", long_about = None)]
struct Cli {
    /// Directory holding the corpus documents
    #[arg(long, env = "MOTOR_CORPUS", default_value = DEFAULT_CORPUS_DIR, global = true)]
    corpus: PathBuf,
    /// Snapshot file to load from and save to
    #[arg(long, env = "MOTOR_SNAPSHOT", default_value = DEFAULT_SNAPSHOT, global = true)]
    snapshot: PathBuf,
    /// Only files ending in this extension are indexed
    #[arg(long, default_value = DEFAULT_EXTENSION, global = true)]
    extension: String,
    /// Print results as JSON
    #[arg(long, default_value_t = false, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the index from the corpus and write the snapshot
    Build,
    /// Documents containing every query term
    Search { query: String },
    /// Documents ranked by TF-IDF score
    Rank {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Indexed terms starting with a prefix
    Complete {
        prefix: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Document and term counts
    Stats,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let config = EngineConfig {
        corpus_dir: cli.corpus.clone(),
        snapshot_path: cli.snapshot.clone(),
        extension: cli.extension.clone(),
    };

    match cli.command {
        Commands::Build => {
            let (engine, report, saved) = build_and_save(&config)?;
            for err in &report.skipped {
                eprintln!("skipped: {err}");
            }
            if !saved {
                bail!("index built but snapshot {} could not be written", config.snapshot_path.display());
            }
            print(cli.json, &engine.stats(), |s| {
                format!("indexed {} documents, {} terms -> {}", s.documents, s.terms, config.snapshot_path.display())
            })
        }
        Commands::Search { query } => {
            let engine = open(&config)?;
            print(cli.json, &engine.boolean_search(&query), |ids| ids.join("\n"))
        }
        Commands::Rank { query, limit } => {
            let engine = open(&config)?;
            print(cli.json, &engine.rank_top(&query, limit), |ranked| {
                ranked
                    .iter()
                    .map(|r| format!("{:.6}\t{}", r.score, r.doc_id))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Commands::Complete { prefix, limit } => {
            let engine = open(&config)?;
            let mut terms = engine.autocomplete(&prefix);
            terms.truncate(limit);
            print(cli.json, &terms, |terms| terms.join("\n"))
        }
        Commands::Stats => {
            let engine = open(&config)?;
            print(cli.json, &engine.stats(), |s| format!("documents: {}\nterms: {}", s.documents, s.terms))
        }
    }
}

/// Startup contract: snapshot if usable, otherwise build from the corpus and save.
fn open(config: &EngineConfig) -> Result<SearchEngine> {
    let (engine, startup) = open_or_build(config)?;
    match startup {
        Startup::Loaded(header) => {
            tracing::info!(snapshot = %config.snapshot_path.display(), created_at = %header.created_at, "serving from snapshot");
        }
        Startup::Built { report, saved } => {
            tracing::info!(
                corpus = %config.corpus_dir.display(),
                documents = report.indexed,
                skipped = report.skipped.len(),
                saved,
                "serving from fresh build"
            );
        }
    }
    Ok(engine)
}

fn print<T: Serialize>(json: bool, value: &T, plain: impl FnOnce(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        let text = plain(value);
        if !text.is_empty() {
            println!("{text}");
        }
    }
    Ok(())
}
