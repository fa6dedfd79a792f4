//! Single-page fetcher: one bounded GET, then content extraction.
//!
//! Every failure (ad URL, transport error, timeout, non-2xx status, page
//! with no extractable text) collapses into `None`. Failures are logged at
//! trace level only.

use crate::config::SearchConfig;
use crate::content::extract_page;
use crate::error::{Result, SearchError};
use crate::filter::is_noise;
use crate::http;
use crate::types::ScrapedPage;

/// Fetches result pages and extracts their readable text.
///
/// Cloning is cheap: clones share the underlying connection pool. The
/// fetcher holds no mutable state, so one instance serves any number of
/// concurrent fetches.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher with the browser-like page client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            client: http::build_page_client(config)?,
        })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `url` and extract at most `max_length` characters of content.
    ///
    /// Returns `None` when the URL is ad-classified or the page cannot be
    /// fetched or extracted.
    pub async fn fetch(&self, url: &str, max_length: usize) -> Option<ScrapedPage> {
        if is_noise(url) {
            tracing::trace!(url, "skipping ad-classified URL");
            return None;
        }

        match self.try_fetch(url, max_length).await {
            Ok(page) => Some(page),
            Err(err) => {
                tracing::trace!(url, error = %err, "page fetch dropped");
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str, max_length: usize) -> Result<ScrapedPage> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("page fetch", &e))?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("page fetch: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("page read", &e))?;

        tracing::trace!(url, bytes = html.len(), "page received");

        extract_page(&html, url, max_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Request, Respond};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = "<html><head><title>Eiffel Tower</title></head>\
        <body><main>The Eiffel Tower is in Paris.</main></body></html>";

    fn fetcher(timeout_seconds: u64) -> PageFetcher {
        let config = SearchConfig {
            fetch_timeout_seconds: timeout_seconds,
            ..Default::default()
        };
        PageFetcher::new(&config).expect("client")
    }

    #[tokio::test]
    async fn successful_fetch_extracts_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eiffel"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/eiffel", server.uri());
        let page = fetcher(5).fetch(&url, 1000).await.expect("page");
        assert_eq!(page.url, url);
        assert_eq!(page.title, "Eiffel Tower");
        assert_eq!(page.content, "The Eiffel Tower is in Paris.");
    }

    #[tokio::test]
    async fn content_is_bounded_by_max_length() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/eiffel"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let url = format!("{}/eiffel", server.uri());
        let page = fetcher(5).fetch(&url, 10).await.expect("page");
        assert_eq!(page.content, "The Eiffel...");
    }

    #[tokio::test]
    async fn non_success_status_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string(PAGE))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        assert!(fetcher(5).fetch(&url, 1000).await.is_none());
    }

    #[tokio::test]
    async fn timeout_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(PAGE)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let url = format!("{}/slow", server.uri());
        assert!(fetcher(1).fetch(&url, 1000).await.is_none());
    }

    #[tokio::test]
    async fn unreachable_host_is_absent() {
        // Port 9 (discard) is not listening on test machines.
        assert!(fetcher(1).fetch("http://127.0.0.1:9/page", 1000).await.is_none());
    }

    #[tokio::test]
    async fn ad_url_is_never_requested() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .expect(0)
            .mount(&server)
            .await;

        let url = format!("{}/ads/banner", server.uri());
        assert!(fetcher(5).fetch(&url, 1000).await.is_none());
    }

    #[tokio::test]
    async fn page_without_text_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/blank"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body><script>1</script></body></html>"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/blank", server.uri());
        assert!(fetcher(5).fetch(&url, 1000).await.is_none());
    }

    /// Rejects any request that carries a `Cookie` header.
    struct RejectCookies;

    impl Respond for RejectCookies {
        fn respond(&self, request: &Request) -> ResponseTemplate {
            if request.headers.contains_key("cookie") {
                ResponseTemplate::new(403)
            } else {
                ResponseTemplate::new(200).set_body_string(PAGE)
            }
        }
    }

    #[tokio::test]
    async fn cookies_from_one_page_are_not_sent_to_the_next() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/consent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("set-cookie", "consent=yes; Path=/")
                    .set_body_string(PAGE),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/check"))
            .respond_with(RejectCookies)
            .mount(&server)
            .await;

        let fetcher = fetcher(5);
        let check = format!("{}/check", server.uri());
        assert!(fetcher.fetch(&check, 1000).await.is_some());
        let consent = format!("{}/consent", server.uri());
        assert!(fetcher.fetch(&consent, 1000).await.is_some());
        assert!(fetcher.fetch(&check, 1000).await.is_some());

        let clone = fetcher.clone();
        assert!(clone.fetch(&check, 1000).await.is_some());
    }
}
