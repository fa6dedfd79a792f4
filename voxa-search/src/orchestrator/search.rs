//! End-to-end search-augmentation pipeline.
//!
//! Fetches hits, filters ads and duplicate titles, scrapes the surviving
//! pages concurrently, pairs pages back to hits by URL, and reranks the
//! resulting documents against the refined query.

use crate::config::SearchConfig;
use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::provider::SearchProvider;
use crate::rerank::{rerank_documents, Reranker};
use crate::scrape::scrape_all;
use crate::types::{RankedDocument, SearchHit, SearchStage, StageCallback};

use super::assemble::build_documents;
use super::dedup::filter_hits;

/// Composes a search provider, the page fetcher and a reranker into the
/// per-turn search pipeline.
///
/// The orchestrator holds no per-request state: every run owns its hit
/// list, title set and scrape results, so one instance can serve
/// concurrent turns.
pub struct SearchOrchestrator<P, R> {
    provider: P,
    reranker: R,
    fetcher: PageFetcher,
    config: SearchConfig,
}

impl<P: SearchProvider, R: Reranker> SearchOrchestrator<P, R> {
    /// Build an orchestrator with a page fetcher configured from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SearchError::Config`] if `config` is invalid, or
    /// [`crate::SearchError::Http`] if the page client cannot be built.
    pub fn new(provider: P, reranker: R, config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = PageFetcher::new(&config)?;
        Ok(Self {
            provider,
            reranker,
            fetcher,
            config,
        })
    }

    /// The configuration this orchestrator was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The reranker this orchestrator scores documents with.
    pub fn reranker(&self) -> &R {
        &self.reranker
    }

    /// Run the pipeline with the configured candidate and result budgets.
    ///
    /// Never fails: any error is logged and yields an empty result, which
    /// callers treat as "no search context".
    pub async fn run(&self, raw_query: &str, rerank_query: &str) -> Vec<RankedDocument> {
        self.run_with_progress(
            raw_query,
            rerank_query,
            self.config.num_scrape,
            self.config.num_rerank,
            None,
        )
        .await
    }

    /// Run the pipeline with explicit budgets, reporting each stage to
    /// `on_stage` when given.
    pub async fn run_with_progress(
        &self,
        raw_query: &str,
        rerank_query: &str,
        num_scrape: usize,
        num_rerank: usize,
        on_stage: Option<&StageCallback>,
    ) -> Vec<RankedDocument> {
        let report = |stage: SearchStage| {
            if let Some(callback) = on_stage {
                callback(stage);
            }
        };

        let ranked = match self
            .try_run(raw_query, rerank_query, num_scrape, num_rerank, &report)
            .await
        {
            Ok(ranked) => ranked,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "search augmentation failed, continuing without search context"
                );
                Vec::new()
            }
        };

        report(SearchStage::Done {
            results: ranked.len(),
        });
        ranked
    }

    async fn try_run(
        &self,
        raw_query: &str,
        rerank_query: &str,
        num_scrape: usize,
        num_rerank: usize,
        report: &(dyn Fn(SearchStage) + Sync),
    ) -> Result<Vec<RankedDocument>> {
        report(SearchStage::Searching);
        let hits = self.collect_hits(raw_query, num_scrape).await;

        report(SearchStage::Filtering { hits: hits.len() });
        let hits = filter_hits(hits);
        let urls: Vec<String> = hits.iter().map(|hit| hit.link.clone()).collect();

        report(SearchStage::Scraping { urls: urls.len() });
        let pages = scrape_all(
            &self.fetcher,
            &urls,
            self.config.max_content_length,
            self.config.max_concurrent_fetches,
        )
        .await;

        let documents = build_documents(&hits, pages);
        if documents.is_empty() {
            tracing::debug!("no documents survived scraping");
            return Ok(Vec::new());
        }

        for (idx, doc) in documents.iter().enumerate() {
            tracing::debug!(rank = idx + 1, title = %doc.title, "unique document");
        }

        report(SearchStage::Reranking {
            documents: documents.len(),
        });
        let ranked = rerank_documents(&self.reranker, rerank_query, documents, num_rerank).await?;

        for (idx, doc) in ranked.iter().enumerate() {
            tracing::debug!(
                rank = idx + 1,
                score = doc.relevance_score,
                title = %doc.document.title,
                "reranked document"
            );
        }
        Ok(ranked)
    }

    /// Fetch hits from the provider, degrading to no hits on failure.
    async fn collect_hits(&self, raw_query: &str, num_scrape: usize) -> Vec<SearchHit> {
        match self.provider.search(raw_query, num_scrape).await {
            Ok(hits) => {
                tracing::debug!(
                    provider = self.provider.name(),
                    count = hits.len(),
                    "provider returned hits"
                );
                hits
            }
            Err(err) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %err,
                    "search provider failed"
                );
                Vec::new()
            }
        }
    }
}
