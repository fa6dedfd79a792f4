//! Result filtering: advertising/tracking URL detection and title
//! normalisation for duplicate detection.
//!
//! Both functions are pure and total. They run before any page is fetched,
//! so a hit dropped here never costs a network request.

use url::Url;

/// Known advertising and tracking domains. A host matches when it equals
/// one of these or is a subdomain of one.
const AD_DOMAINS: &[&str] = &[
    "doubleclick.net",
    "google-analytics.com",
    "googleadservices.com",
    "advertising.com",
    "adnxs.com",
    "outbrain.com",
    "taboola.com",
    "amazon-adsystem.com",
    "clickbank.net",
];

/// Lexical markers of ad, tracking and affiliate URLs, matched anywhere in
/// the lower-cased URL.
const AD_INDICATORS: &[&str] = &[
    "/ads/",
    "ad.",
    "advert",
    "sponsor",
    "promoted",
    "pixel",
    "tracking",
    "doubleclick",
    "analytics",
    "campaign",
    "banner",
    "clickthrough",
    "affiliate",
    "promo",
    "commerc",
];

/// Returns `true` if `url` looks like advertising or tracking noise.
///
/// A URL that cannot be parsed skips the domain check (fail open) and is
/// judged on the lexical indicators alone.
pub fn is_noise(url: &str) -> bool {
    let lower = url.to_lowercase();

    let blocked_host = Url::parse(&lower)
        .ok()
        .and_then(|parsed| parsed.host_str().map(is_blocked_host))
        .unwrap_or(false);

    blocked_host || AD_INDICATORS.iter().any(|marker| lower.contains(marker))
}

fn is_blocked_host(host: &str) -> bool {
    AD_DOMAINS.iter().any(|domain| {
        host == *domain
            || host
                .strip_suffix(domain)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Canonicalise a result title into a duplicate-detection key.
///
/// Lower-cases, drops every character that is neither a word character
/// (alphanumeric or `_`) nor whitespace, and collapses whitespace runs into
/// single spaces.
pub fn normalize_title(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
