//! Per-turn progress reporting.
//!
//! Each conversational turn gets its own [`ProgressCallback`], so concurrent
//! turns never share a stage value. The search pipeline's
//! [`SearchStage`](voxa_search::SearchStage) events are mapped onto
//! [`TurnStage`] before they reach the callback.

use serde::Serialize;
use voxa_search::SearchStage;

/// Stage of a conversational turn, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum TurnStage {
    /// Querying the web search API.
    Searching,
    /// Dropping ads and duplicate results.
    Filtering {
        /// Hits returned by the search API.
        hits: usize,
    },
    /// Fetching result pages.
    Scraping {
        /// Pages being fetched.
        urls: usize,
    },
    /// Scoring documents against the refined query.
    Ranking {
        /// Documents submitted for scoring.
        documents: usize,
    },
    /// Search augmentation finished.
    SearchComplete {
        /// Documents kept as search context (zero means none).
        results: usize,
    },
}

impl TurnStage {
    /// Short status line for display.
    pub fn label(&self) -> String {
        match self {
            Self::Searching => "Searching the web".to_owned(),
            Self::Filtering { hits } => format!("Filtering {hits} results"),
            Self::Scraping { urls } => format!("Reading {urls} pages"),
            Self::Ranking { documents } => format!("Ranking {documents} documents"),
            Self::SearchComplete { results: 0 } => "No search context found".to_owned(),
            Self::SearchComplete { results } => format!("Found {results} relevant sources"),
        }
    }
}

impl From<SearchStage> for TurnStage {
    fn from(stage: SearchStage) -> Self {
        match stage {
            SearchStage::Searching => Self::Searching,
            SearchStage::Filtering { hits } => Self::Filtering { hits },
            SearchStage::Scraping { urls } => Self::Scraping { urls },
            SearchStage::Reranking { documents } => Self::Ranking { documents },
            SearchStage::Done { results } => Self::SearchComplete { results },
        }
    }
}

/// Callback type for turn progress reporting.
pub type ProgressCallback = Box<dyn Fn(TurnStage) + Send + Sync>;
