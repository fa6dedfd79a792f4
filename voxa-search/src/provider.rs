//! Search result providers.
//!
//! A [`SearchProvider`] turns a query into an ordered list of
//! [`SearchHit`]s. [`GoogleCustomSearch`] implements it on top of the
//! Google Custom Search JSON API, paging through results.

use serde::Deserialize;

use crate::config::{GoogleSearchConfig, SearchConfig};
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::SearchHit;

/// A pluggable web search backend.
///
/// Implementations must return hits in a stable order for identical
/// queries: duplicate filtering keeps the first occurrence of each title.
/// All implementations must be `Send + Sync` so one provider can serve
/// concurrent requests.
pub trait SearchProvider: Send + Sync {
    /// Search the web for `query`, returning at most `num_results` hits.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if any request to the backend fails or its
    /// response cannot be parsed.
    fn search(
        &self,
        query: &str,
        num_results: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>>> + Send;

    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;
}

/// Google Custom Search JSON API client.
///
/// Requests `search_pages` pages of `page_size` results, stopping early
/// once a page comes back short (the index is exhausted) or enough hits
/// have been collected. A failed page fails the whole call.
#[derive(Debug, Clone)]
pub struct GoogleCustomSearch {
    client: reqwest::Client,
    google: GoogleSearchConfig,
    pages: usize,
    page_size: usize,
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

impl CseItem {
    /// Items without a title or link are not usable hits.
    fn into_hit(self) -> Option<SearchHit> {
        Some(SearchHit {
            title: self.title?,
            link: self.link?,
            snippet: self.snippet.unwrap_or_default(),
        })
    }
}

impl GoogleCustomSearch {
    /// Create a client for the given credentials and paging settings.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if credentials are missing, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(google: GoogleSearchConfig, config: &SearchConfig) -> Result<Self> {
        google.validate()?;
        Ok(Self {
            client: http::build_api_client(config.search_timeout_seconds)?,
            google,
            pages: config.search_pages,
            page_size: config.page_size,
        })
    }

    async fn fetch_page(&self, query: &str, start: usize) -> Result<Vec<CseItem>> {
        let url = format!(
            "{}/customsearch/v1",
            self.google.base_url.trim_end_matches('/')
        );
        let num = self.page_size.to_string();
        let start = start.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.google.api_key.as_str()),
                ("cx", self.google.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
                ("start", start.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("search API", &e))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("search API: {e}")))?;

        let body: CseResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(format!("search API response: {e}")))?;

        Ok(body.items)
    }
}

impl SearchProvider for GoogleCustomSearch {
    /// Requests up to `pages` pages, stopping early at the first short page.
    async fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchHit>> {
        tracing::trace!(query, num_results, "Google custom search");

        let mut hits = Vec::new();
        for page in 0..self.pages {
            if hits.len() >= num_results {
                break;
            }

            let items = self.fetch_page(query, page * self.page_size + 1).await?;
            let returned = items.len();
            hits.extend(items.into_iter().filter_map(CseItem::into_hit));

            tracing::trace!(page, returned, "search page received");
            if returned < self.page_size {
                break;
            }
        }

        hits.truncate(num_results);
        Ok(hits)
    }

    fn name(&self) -> &'static str {
        "Google"
    }
}
