//! # voxa-search
//!
//! Search augmentation for Voxa conversational turns.
//!
//! Given a user query and a refined rerank query, this crate retrieves
//! candidate results from a web search API, drops advertisements and
//! duplicate titles, fetches and extracts readable content from every
//! surviving page concurrently, and reranks the resulting documents to
//! surface the most relevant handful for answer generation.
//!
//! ## Design
//!
//! - Search results come from a pluggable [`SearchProvider`]
//!   ([`GoogleCustomSearch`] by default)
//! - Pages are fetched with bounded parallelism; failed fetches are dropped,
//!   never retried
//! - Scraped pages are paired back to their hits by URL, not by position
//! - A single rerank call per run through a pluggable [`Reranker`]
//!   ([`CohereReranker`] by default)
//! - Graceful degradation: the pipeline never fails past its boundary, it
//!   returns fewer (or no) documents instead
//!
//! ## Security
//!
//! - Search queries are logged only at trace level
//! - API keys never appear in errors or logs

pub mod config;
pub mod content;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod http;
pub mod orchestrator;
pub mod provider;
pub mod rerank;
pub mod scrape;
pub mod types;

pub use config::{CohereConfig, GoogleSearchConfig, SearchConfig};
pub use error::{Result, SearchError};
pub use fetcher::PageFetcher;
pub use orchestrator::SearchOrchestrator;
pub use provider::{GoogleCustomSearch, SearchProvider};
pub use rerank::{CohereReranker, Reranker};
pub use types::{
    sources, Document, RankedDocument, RankedSource, ScrapedPage, SearchHit, SearchStage,
    StageCallback,
};

/// Orchestrator over the Google Custom Search and Cohere rerank backends.
pub type WebSearchOrchestrator = SearchOrchestrator<GoogleCustomSearch, CohereReranker>;

/// Build the default orchestrator from its three configuration sections.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if any section is invalid or missing
/// credentials, or [`SearchError::Http`] if an HTTP client cannot be built.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> voxa_search::Result<()> {
/// use voxa_search::{CohereConfig, GoogleSearchConfig, SearchConfig};
///
/// let google = GoogleSearchConfig {
///     api_key: "key".into(),
///     engine_id: "cx".into(),
///     ..Default::default()
/// };
/// let cohere = CohereConfig {
///     api_key: "key".into(),
///     ..Default::default()
/// };
/// let orchestrator = voxa_search::build_orchestrator(SearchConfig::default(), google, cohere)?;
/// let ranked = voxa_search::search_web(
///     &orchestrator,
///     "capital of france",
///     "capital city of France",
///     30,
///     5,
/// )
/// .await;
/// for source in voxa_search::sources(&ranked) {
///     println!("{}: {}", source.title, source.url);
/// }
/// # Ok(())
/// # }
/// ```
pub fn build_orchestrator(
    config: SearchConfig,
    google: GoogleSearchConfig,
    cohere: CohereConfig,
) -> Result<WebSearchOrchestrator> {
    config.validate()?;
    let provider = GoogleCustomSearch::new(google, &config)?;
    let reranker = CohereReranker::new(cohere, &config)?;
    SearchOrchestrator::new(provider, reranker, config)
}

/// Search the web for `query` and return up to `num_rerank` documents
/// reranked against `rerank_query`.
///
/// `num_scrape` bounds how many search hits become scrape candidates.
/// Never fails: an empty result means "no search context".
pub async fn search_web<P: SearchProvider, R: Reranker>(
    orchestrator: &SearchOrchestrator<P, R>,
    query: &str,
    rerank_query: &str,
    num_scrape: usize,
    num_rerank: usize,
) -> Vec<RankedDocument> {
    orchestrator
        .run_with_progress(query, rerank_query, num_scrape, num_rerank, None)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google() -> GoogleSearchConfig {
        GoogleSearchConfig {
            api_key: "k".into(),
            engine_id: "cx".into(),
            ..Default::default()
        }
    }

    fn cohere() -> CohereConfig {
        CohereConfig {
            api_key: "k".into(),
            ..Default::default()
        }
    }

    #[test]
    fn build_orchestrator_with_valid_config() {
        let orchestrator = build_orchestrator(SearchConfig::default(), google(), cohere());
        assert!(orchestrator.is_ok());
    }

    #[test]
    fn build_orchestrator_rejects_invalid_search_config() {
        let config = SearchConfig {
            max_concurrent_fetches: 0,
            ..Default::default()
        };
        let err = build_orchestrator(config, google(), cohere()).err().map(|e| e.to_string());
        assert!(err.unwrap_or_default().contains("max_concurrent_fetches"));
    }

    #[test]
    fn build_orchestrator_rejects_missing_credentials() {
        let result = build_orchestrator(SearchConfig::default(), google(), CohereConfig::default());
        assert!(result.is_err());
    }
}
