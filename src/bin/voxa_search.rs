//! Run one search-augmentation turn from the command line.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use voxa::{TurnStage, VoxaConfig, WebSearch};
use voxa_search::{RankedDocument, RankedSource};

/// Search the web, scrape the results and rerank them against a refined query.
#[derive(Parser)]
#[command(name = "voxa-search", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Query used for reranking (defaults to the search query).
    #[arg(short, long)]
    rerank_query: Option<String>,

    /// Number of search hits to consider for scraping.
    #[arg(long)]
    num_scrape: Option<usize>,

    /// Number of reranked documents to return.
    #[arg(long)]
    num_rerank: Option<usize>,

    /// Print stage updates to stderr.
    #[arg(short, long)]
    progress: bool,

    /// Search query.
    #[arg(required = true)]
    query: Vec<String>,
}

#[derive(Serialize)]
struct Output<'a> {
    query: &'a str,
    rerank_query: &'a str,
    sources: Vec<RankedSource>,
    documents: &'a [RankedDocument],
}

fn main() -> anyhow::Result<()> {
    // Stdout is reserved for the JSON result.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voxa=info,voxa_search=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = VoxaConfig::load(cli.config.as_deref())?;

    let query = cli.query.join(" ");
    let rerank_query = cli.rerank_query.unwrap_or_else(|| query.clone());
    let num_scrape = cli.num_scrape.unwrap_or(config.search.num_scrape);
    let num_rerank = cli.num_rerank.unwrap_or(config.search.num_rerank);

    let search = WebSearch::from_config(&config)?;
    tracing::info!(num_scrape, num_rerank, "running search turn");

    let ranked = if cli.progress {
        search.search_web_with_progress(
            &query,
            &rerank_query,
            num_scrape,
            num_rerank,
            Box::new(|stage: TurnStage| eprintln!("{}", stage.label())),
        )
    } else {
        search.search_web(&query, &rerank_query, num_scrape, num_rerank)
    };

    let output = Output {
        query: &query,
        rerank_query: &rerank_query,
        sources: voxa::web_search::sources(&ranked),
        documents: &ranked,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
