//! Concurrent scrape coordinator.
//!
//! Fans a URL list out to a [`PageFetcher`] with at most
//! `max_concurrency` fetches in flight and keeps only the pages that came
//! back. Partial failure is the normal case; nothing is retried.

use futures::stream::{self, StreamExt};

use crate::fetcher::PageFetcher;
use crate::types::ScrapedPage;

/// Scrape every URL concurrently, returning the successful pages in
/// completion order.
///
/// The result holds at most `urls.len()` pages. A `max_concurrency` of 0
/// is treated as 1.
pub async fn scrape_all(
    fetcher: &PageFetcher,
    urls: &[String],
    max_length: usize,
    max_concurrency: usize,
) -> Vec<ScrapedPage> {
    let pages: Vec<ScrapedPage> = stream::iter(urls)
        .map(|url| fetcher.fetch(url, max_length))
        .buffer_unordered(max_concurrency.max(1))
        .filter_map(|page| async move { page })
        .collect()
        .await;

    tracing::debug!(
        requested = urls.len(),
        scraped = pages.len(),
        "scrape batch finished"
    );
    pages
}
