//! Error types for the voxa-search crate.
//!
//! All errors use stable string messages suitable for logging. No API keys
//! or other secrets appear in error messages.

/// Errors that can occur inside the search-augmentation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A request timed out before the remote side answered.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A response body or page could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The rerank service failed or returned an unusable response.
    #[error("rerank error: {0}")]
    Rerank(String),
}

impl SearchError {
    /// Map a [`reqwest::Error`] to a timeout or HTTP error, prefixed with
    /// the name of the remote service.
    pub(crate) fn from_reqwest(service: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{service}: {err}"))
        } else {
            Self::Http(format!("{service}: {err}"))
        }
    }
}

/// Convenience type alias for voxa-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
