//! Core record types flowing through the search-augmentation pipeline.
//!
//! Every value here is request-scoped: created during one pipeline run and
//! dropped when the caller is done with the ranked output.

use serde::{Deserialize, Serialize};

/// A single raw result from the web search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The title of the result page as reported by the search API.
    pub title: String,
    /// The URL of the result page.
    pub link: String,
    /// A short text snippet from the search API (may be empty).
    pub snippet: String,
}

/// Readable content extracted from one successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// The URL that was fetched.
    pub url: String,
    /// The page `<title>`, empty when the page has none.
    pub title: String,
    /// Whitespace-collapsed body text, bounded by the requested max length.
    pub content: String,
}

/// A search hit enriched with the content scraped from its page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Title from the search hit.
    pub title: String,
    /// Link from the search hit.
    pub link: String,
    /// Snippet from the search hit.
    pub snippet: String,
    /// Text scraped from the linked page.
    pub detailed_content: String,
}

impl Document {
    /// Pair a hit with the page scraped from its link.
    pub fn from_hit(hit: &SearchHit, page: &ScrapedPage) -> Self {
        Self {
            title: hit.title.clone(),
            link: hit.link.clone(),
            snippet: hit.snippet.clone(),
            detailed_content: page.content.clone(),
        }
    }

    /// Serialise this document into the single text blob sent to the
    /// rerank service.
    pub fn rerank_text(&self) -> String {
        format!(
            "Title: {}\nSnippet: {}\nContent: {}",
            self.title, self.snippet, self.detailed_content
        )
    }
}

/// A document together with the relevance score the reranker assigned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedDocument {
    /// The ranked document.
    pub document: Document,
    /// Relevance score from the rerank service (higher is more relevant).
    pub relevance_score: f64,
}

impl RankedDocument {
    /// Project this document into its citation shape.
    pub fn source(&self) -> RankedSource {
        RankedSource {
            title: self.document.title.clone(),
            url: self.document.link.clone(),
        }
    }
}

/// Citation returned to the caller alongside the final answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSource {
    /// Title of the cited page.
    pub title: String,
    /// URL of the cited page.
    pub url: String,
}

/// Project ranked documents into their citation shapes, preserving order.
pub fn sources(ranked: &[RankedDocument]) -> Vec<RankedSource> {
    ranked.iter().map(RankedDocument::source).collect()
}

/// A stage of the search pipeline, reported to a per-request callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStage {
    /// Querying the search API.
    Searching,
    /// Dropping ads and duplicate titles from `hits` raw results.
    Filtering {
        /// Number of hits returned by the provider.
        hits: usize,
    },
    /// Fetching page content for the surviving URLs.
    Scraping {
        /// Number of URLs dispatched to the fetchers.
        urls: usize,
    },
    /// Sending documents to the rerank service.
    Reranking {
        /// Number of documents built from scraped pages.
        documents: usize,
    },
    /// The pipeline finished with `results` ranked documents.
    Done {
        /// Number of ranked documents returned.
        results: usize,
    },
}

/// Callback type for receiving pipeline stages of one request.
pub type StageCallback = Box<dyn Fn(SearchStage) + Send + Sync>;
