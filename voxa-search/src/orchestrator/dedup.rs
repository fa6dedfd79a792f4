//! Hit filtering by ad classification and normalised title.
//!
//! Runs before scraping so that dropped hits never cost a page fetch.
//! The first hit with a given normalised title wins; later ones are
//! dropped. An ad-classified hit does not claim its title.

use std::collections::HashSet;

use crate::filter::{is_noise, normalize_title};
use crate::types::SearchHit;

/// Drop ad-classified hits and hits whose normalised title was already
/// seen, preserving provider order.
pub fn filter_hits(hits: Vec<SearchHit>) -> Vec<SearchHit> {
    let mut seen_titles: HashSet<String> = HashSet::new();

    hits.into_iter()
        .filter(|hit| {
            if is_noise(&hit.link) {
                tracing::trace!(url = %hit.link, "dropping ad-classified hit");
                return false;
            }
            let key = normalize_title(&hit.title);
            if !seen_titles.insert(key) {
                tracing::trace!(title = %hit.title, "dropping duplicate title");
                return false;
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, link: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            link: link.to_string(),
            snippet: format!("Snippet for {title}"),
        }
    }

    #[test]
    fn unique_clean_hits_pass_through_in_order() {
        let hits = vec![
            hit("Paris", "https://a.example.org/paris"),
            hit("Lyon", "https://b.example.org/lyon"),
            hit("Nice", "https://c.example.org/nice"),
        ];
        let kept = filter_hits(hits.clone());
        assert_eq!(kept, hits);
    }

    #[test]
    fn first_normalised_title_wins() {
        let hits = vec![
            hit("Paris - Wikipedia", "https://en.wikipedia.org/wiki/Paris"),
            hit("paris: wikipedia!", "https://mirror.example.org/paris"),
            hit("PARIS  WIKIPEDIA", "https://other.example.org/paris"),
        ];
        let kept = filter_hits(hits);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].link, "https://en.wikipedia.org/wiki/Paris");
    }

    #[test]
    fn ad_hits_are_dropped() {
        let hits = vec![
            hit("Cheap flights", "https://ad.doubleclick.net/click?x=1"),
            hit("Paris guide", "https://guide.example.org/paris"),
            hit("Sponsored stays", "https://stays.example.org/sponsored/paris"),
        ];
        let kept = filter_hits(hits);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].title, "Paris guide");
    }

    #[test]
    fn ad_hit_does_not_claim_its_title() {
        let hits = vec![
            hit("Paris guide", "https://www.taboola.com/paris"),
            hit("Paris guide", "https://guide.example.org/paris"),
        ];
        let kept = filter_hits(hits);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].link, "https://guide.example.org/paris");
    }

    #[test]
    fn same_url_with_different_titles_is_kept() {
        let hits = vec![
            hit("Paris", "https://a.example.org/paris"),
            hit("Paris overview", "https://a.example.org/paris"),
        ];
        assert_eq!(filter_hits(hits).len(), 2);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(filter_hits(Vec::new()).is_empty());
    }
}
