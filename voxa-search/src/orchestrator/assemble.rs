//! Pairing of filtered hits with scraped pages.
//!
//! Scrape results arrive in completion order, so pairing goes through a
//! map keyed by URL rather than by position. Documents come out in
//! provider order.

use std::collections::HashMap;

use crate::types::{Document, ScrapedPage, SearchHit};

/// Build one [`Document`] per hit whose link was scraped successfully.
///
/// Hits without a matching page are dropped.
pub fn build_documents(hits: &[SearchHit], pages: Vec<ScrapedPage>) -> Vec<Document> {
    let by_url: HashMap<String, ScrapedPage> = pages
        .into_iter()
        .map(|page| (page.url.clone(), page))
        .collect();

    hits.iter()
        .filter_map(|hit| {
            by_url
                .get(&hit.link)
                .map(|page| Document::from_hit(hit, page))
        })
        .collect()
}
