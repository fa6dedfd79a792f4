//! Synchronous web search bridge for conversational turns.
//!
//! Wraps the async [`voxa_search`] pipeline behind a blocking interface:
//! the conversational component hands over the user's query and the refined
//! rerank query, and gets back the ranked documents once the whole pipeline
//! has finished.

use voxa_search::{
    RankedDocument, RankedSource, Reranker, SearchOrchestrator, SearchProvider, StageCallback,
    WebSearchOrchestrator,
};

use crate::config::VoxaConfig;
use crate::conversation::{ChatHistory, Role};
use crate::error::{Result, VoxaError};
use crate::progress::{ProgressCallback, TurnStage};

/// Blocking front end to the search-augmentation pipeline.
///
/// Owns a multi-threaded tokio runtime so callers need not be async. Must
/// not be called from inside another tokio runtime.
pub struct WebSearch<P = voxa_search::GoogleCustomSearch, R = voxa_search::CohereReranker> {
    runtime: tokio::runtime::Runtime,
    orchestrator: SearchOrchestrator<P, R>,
}

impl WebSearch {
    /// Build the Google + Cohere pipeline from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`VoxaError::Config`] if the configuration is invalid, or an
    /// error if the HTTP clients or the runtime cannot be built.
    pub fn from_config(config: &VoxaConfig) -> Result<Self> {
        config.validate()?;
        let orchestrator: WebSearchOrchestrator = voxa_search::build_orchestrator(
            config.search.clone(),
            config.google.clone(),
            config.cohere.clone(),
        )?;
        Self::with_orchestrator(orchestrator)
    }
}

impl<P: SearchProvider, R: Reranker> WebSearch<P, R> {
    /// Wrap an already-built orchestrator.
    ///
    /// # Errors
    ///
    /// Returns [`VoxaError::Runtime`] if the tokio runtime cannot be built.
    pub fn with_orchestrator(orchestrator: SearchOrchestrator<P, R>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("voxa-search")
            .enable_all()
            .build()
            .map_err(|e| VoxaError::Runtime(e.to_string()))?;
        Ok(Self {
            runtime,
            orchestrator,
        })
    }

    /// Search for `query`, rerank against `rerank_query`, and block until
    /// done. An empty result means "answer without search context".
    pub fn search_web(
        &self,
        query: &str,
        rerank_query: &str,
        num_scrape: usize,
        num_rerank: usize,
    ) -> Vec<RankedDocument> {
        self.runtime.block_on(voxa_search::search_web(
            &self.orchestrator,
            query,
            rerank_query,
            num_scrape,
            num_rerank,
        ))
    }

    /// Like [`search_web`](Self::search_web), reporting each stage of this
    /// call to `on_progress`.
    pub fn search_web_with_progress(
        &self,
        query: &str,
        rerank_query: &str,
        num_scrape: usize,
        num_rerank: usize,
        on_progress: ProgressCallback,
    ) -> Vec<RankedDocument> {
        let forward: StageCallback = Box::new(move |stage| on_progress(TurnStage::from(stage)));
        self.runtime.block_on(self.orchestrator.run_with_progress(
            query,
            rerank_query,
            num_scrape,
            num_rerank,
            Some(&forward),
        ))
    }

    /// Ground the latest turn of `history` with web search.
    ///
    /// The refined query is recorded as a scratch turn, and the search
    /// context as a scratch system message when any documents were found.
    /// Uses the configured scrape and rerank budgets.
    pub fn augment_turn(
        &self,
        history: &mut ChatHistory,
        query: &str,
        refined_query: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Vec<RankedDocument> {
        history.push_scratch(Role::Assistant, refined_query);

        let config = self.orchestrator.config();
        let (num_scrape, num_rerank) = (config.num_scrape, config.num_rerank);
        let ranked = match on_progress {
            Some(callback) => self.search_web_with_progress(
                query,
                refined_query,
                num_scrape,
                num_rerank,
                callback,
            ),
            None => self.search_web(query, refined_query, num_scrape, num_rerank),
        };

        if !ranked.is_empty() {
            history.push_scratch(Role::System, format_context(&ranked));
        }
        tracing::info!(documents = ranked.len(), "search augmentation finished");
        ranked
    }
}

/// Citation list for the ranked documents, in rank order.
pub fn sources(ranked: &[RankedDocument]) -> Vec<RankedSource> {
    voxa_search::sources(ranked)
}

/// Render ranked documents as a numbered context block for answer
/// generation.
pub fn format_context(ranked: &[RankedDocument]) -> String {
    let mut output = String::from("## Web search results\n\n");
    for (i, doc) in ranked.iter().enumerate() {
        let d = &doc.document;
        output.push_str(&format!(
            "{}. **{}**\n   URL: {}\n   {}\n   {}\n\n",
            i + 1,
            d.title,
            d.link,
            d.snippet,
            d.detailed_content,
        ));
    }
    output
}
