//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls candidate budgets, content bounds, scrape
//! parallelism, and timeouts. [`GoogleSearchConfig`] and [`CohereConfig`]
//! describe the two external APIs the pipeline talks to.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default base URL of the Google Custom Search JSON API.
pub const GOOGLE_BASE_URL: &str = "https://www.googleapis.com";

/// Default base URL of the Cohere API.
pub const COHERE_BASE_URL: &str = "https://api.cohere.com";

/// Default Cohere rerank model.
pub const DEFAULT_RERANK_MODEL: &str = "rerank-v3.5";

/// Configuration for one search-augmentation run.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// How many search hits to request as scrape candidates.
    pub num_scrape: usize,
    /// How many reranked documents to return.
    pub num_rerank: usize,
    /// Maximum characters of page content kept per scraped page.
    pub max_content_length: usize,
    /// Maximum number of page fetches in flight at once.
    pub max_concurrent_fetches: usize,
    /// Per-page HTTP timeout in seconds.
    pub fetch_timeout_seconds: u64,
    /// Timeout in seconds for search API and rerank API calls.
    pub search_timeout_seconds: u64,
    /// Number of result pages requested from the search API.
    pub search_pages: usize,
    /// Results per search API page (the Google API caps this at 10).
    pub page_size: usize,
    /// Custom User-Agent for page fetches. If `None`, a realistic desktop
    /// browser User-Agent is picked from a built-in list.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_scrape: 30,
            num_rerank: 5,
            max_content_length: 1000,
            max_concurrent_fetches: 10,
            fetch_timeout_seconds: 5,
            search_timeout_seconds: 10,
            search_pages: 3,
            page_size: 10,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `num_scrape`, `num_rerank` and `max_content_length` must be greater than 0
    /// - `max_concurrent_fetches` must be greater than 0
    /// - both timeouts must be greater than 0
    /// - `search_pages` must be greater than 0
    /// - `page_size` must be between 1 and 10
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_scrape == 0 {
            return Err(SearchError::Config(
                "num_scrape must be greater than 0".into(),
            ));
        }
        if self.num_rerank == 0 {
            return Err(SearchError::Config(
                "num_rerank must be greater than 0".into(),
            ));
        }
        if self.max_content_length == 0 {
            return Err(SearchError::Config(
                "max_content_length must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(SearchError::Config(
                "max_concurrent_fetches must be greater than 0".into(),
            ));
        }
        if self.fetch_timeout_seconds == 0 || self.search_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout seconds must be greater than 0".into(),
            ));
        }
        if self.search_pages == 0 {
            return Err(SearchError::Config(
                "search_pages must be greater than 0".into(),
            ));
        }
        if self.page_size == 0 || self.page_size > 10 {
            return Err(SearchError::Config(
                "page_size must be between 1 and 10".into(),
            ));
        }
        Ok(())
    }
}

/// Credentials and endpoint for the Google Custom Search JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleSearchConfig {
    /// API key (`key` query parameter).
    pub api_key: String,
    /// Programmable search engine ID (`cx` query parameter).
    pub engine_id: String,
    /// API base URL, overridable for tests and proxies.
    pub base_url: String,
}

impl Default for GoogleSearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            engine_id: String::new(),
            base_url: GOOGLE_BASE_URL.to_owned(),
        }
    }
}

impl GoogleSearchConfig {
    /// Returns an error if the key or engine ID is missing.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::Config("google api_key is not set".into()));
        }
        if self.engine_id.trim().is_empty() {
            return Err(SearchError::Config("google engine_id is not set".into()));
        }
        Ok(())
    }
}

/// Credentials and endpoint for the Cohere rerank API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CohereConfig {
    /// Bearer API key.
    pub api_key: String,
    /// Rerank model identifier.
    pub model: String,
    /// API base URL, overridable for tests and proxies.
    pub base_url: String,
}

impl Default for CohereConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_RERANK_MODEL.to_owned(),
            base_url: COHERE_BASE_URL.to_owned(),
        }
    }
}

impl CohereConfig {
    /// Returns an error if the key or model is missing.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::Config("cohere api_key is not set".into()));
        }
        if self.model.trim().is_empty() {
            return Err(SearchError::Config("cohere model is not set".into()));
        }
        Ok(())
    }
}
