//! Relevance reranking against a refined query.
//!
//! [`rerank_documents`] serialises each [`Document`], hands the batch to a
//! [`Reranker`], and maps the returned indexes back to documents. The
//! [`CohereReranker`] backend talks to a Cohere-compatible `/v2/rerank`
//! endpoint.

use serde::{Deserialize, Serialize};

use crate::config::{CohereConfig, SearchConfig};
use crate::error::{Result, SearchError};
use crate::http;
use crate::types::{Document, RankedDocument};

/// One entry of a rerank response: a position in the submitted batch and
/// its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RerankScore {
    /// Index into the submitted documents.
    pub index: usize,
    /// Relevance score (higher is more relevant).
    pub relevance_score: f64,
}

/// A pluggable rerank backend.
pub trait Reranker: Send + Sync {
    /// Score `documents` against `query`, returning at most `top_n` entries.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the backend is unreachable or answers with
    /// an error or an unparseable body.
    fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> impl std::future::Future<Output = Result<Vec<RerankScore>>> + Send;

    /// Human-readable backend name for logs.
    fn name(&self) -> &'static str;
}

/// Rerank `documents` against `query` and keep the best `top_n`.
///
/// `top_n` is clamped to the number of documents, so asking for more than
/// exist returns every document, ranked. An empty batch returns an empty
/// result without calling the backend. Output is sorted by descending
/// relevance score.
///
/// # Errors
///
/// Propagates backend errors, and returns [`SearchError::Rerank`] if the
/// backend refers to a document index that was never submitted.
pub async fn rerank_documents<R: Reranker>(
    reranker: &R,
    query: &str,
    documents: Vec<Document>,
    top_n: usize,
) -> Result<Vec<RankedDocument>> {
    let top_n = top_n.min(documents.len());
    if top_n == 0 {
        return Ok(Vec::new());
    }

    let texts: Vec<String> = documents.iter().map(Document::rerank_text).collect();
    let scores = reranker.rerank(query, &texts, top_n).await?;

    let mut ranked = scores
        .into_iter()
        .map(|score| {
            documents
                .get(score.index)
                .map(|document| RankedDocument {
                    document: document.clone(),
                    relevance_score: score.relevance_score,
                })
                .ok_or_else(|| {
                    SearchError::Rerank(format!(
                        "{} returned index {} for {} documents",
                        reranker.name(),
                        score.index,
                        documents.len()
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    Ok(ranked)
}

/// Cohere rerank API client.
#[derive(Debug, Clone)]
pub struct CohereReranker {
    client: reqwest::Client,
    cohere: CohereConfig,
}

#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: &'a [String],
    top_n: usize,
}

#[derive(Debug, Deserialize)]
struct RerankResponse {
    results: Vec<RerankScore>,
}

impl CohereReranker {
    /// Create a client for the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the key or model is missing, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(cohere: CohereConfig, config: &SearchConfig) -> Result<Self> {
        cohere.validate()?;
        Ok(Self {
            client: http::build_api_client(config.search_timeout_seconds)?,
            cohere,
        })
    }
}

impl Reranker for CohereReranker {
    async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RerankScore>> {
        let url = format!("{}/v2/rerank", self.cohere.base_url.trim_end_matches('/'));
        let request = RerankRequest {
            model: &self.cohere.model,
            query,
            documents,
            top_n,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.cohere.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("rerank API", &e))?
            .error_for_status()
            .map_err(|e| SearchError::Rerank(format!("rerank API: {e}")))?;

        let body: RerankResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Rerank(format!("rerank API response: {e}")))?;

        tracing::debug!(returned = body.results.len(), top_n, "rerank scores received");
        Ok(body.results)
    }

    fn name(&self) -> &'static str {
        "Cohere"
    }
}
