//! HTML content extraction — strips boilerplate and returns a bounded
//! plain-text excerpt.
//!
//! Removes non-content elements (scripts, styles, navigation, footers,
//! embedded frames), prefers semantic content containers, falls back to
//! paragraphs, collapses whitespace and truncates deterministically.

use crate::error::{Result, SearchError};
use crate::types::ScrapedPage;
use scraper::{ElementRef, Html, Selector};

/// Marker appended to content cut at the length limit.
pub const TRUNCATION_MARKER: &str = "...";

/// Elements removed, with their content, before text extraction.
const BOILERPLATE_TAGS: &[&str] = &["script", "style", "nav", "footer", "iframe"];

/// Semantic containers preferred as the content source.
const CONTENT_CONTAINERS: &str = "article, main, [role=\"main\"]";

/// Extract a [`ScrapedPage`] from raw HTML, keeping at most `max_length`
/// characters of body text.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if no text can be extracted.
pub fn extract_page(html: &str, url: &str, max_length: usize) -> Result<ScrapedPage> {
    let cleaned_html = strip_boilerplate_tags(html);
    let document = Html::parse_document(&cleaned_html);

    let title = extract_title(&document);
    let text = collapse_whitespace(&extract_main_text(&document));
    if text.is_empty() {
        return Err(SearchError::Parse("no extractable content found".into()));
    }

    Ok(ScrapedPage {
        url: url.to_owned(),
        title,
        content: truncate_chars(&text, max_length),
    })
}

/// Extract the page title from the `<title>` element.
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
        .trim()
        .to_owned()
}

/// Text of every content container, or of every paragraph when the page
/// has no container.
fn extract_main_text(document: &Html) -> String {
    if let Ok(containers) = Selector::parse(CONTENT_CONTAINERS) {
        // Skip containers nested in another container so their text is not
        // counted twice.
        let texts: Vec<String> = document
            .select(&containers)
            .filter(|el| !has_matching_ancestor(el, &containers))
            .map(|el| element_text(&el))
            .collect();
        if !texts.is_empty() {
            return texts.join(" ");
        }
    }

    let Ok(paragraphs) = Selector::parse("p") else {
        return String::new();
    };
    document
        .select(&paragraphs)
        .map(|el| element_text(&el))
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_matching_ancestor(element: &ElementRef<'_>, selector: &Selector) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| selector.matches(&ancestor))
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Remove boilerplate HTML elements and their content before parsing.
fn strip_boilerplate_tags(html: &str) -> String {
    let mut result = html.to_owned();
    for tag in BOILERPLATE_TAGS {
        result = strip_tag(&result, tag);
    }
    result
}

/// Remove all instances of a specific HTML tag and its content.
fn strip_tag(html: &str, tag: &str) -> String {
    let mut result = String::with_capacity(html.len());
    // ASCII lowercasing keeps byte offsets aligned with `html`.
    let lower = html.to_ascii_lowercase();
    let open_tag = format!("<{tag}");
    let close_tag = format!("</{tag}>");

    let mut pos = 0;
    loop {
        let start = match lower[pos..].find(&open_tag) {
            Some(offset) => pos + offset,
            None => {
                result.push_str(&html[pos..]);
                break;
            }
        };

        // Verify this is actually the target tag (not e.g. <navigate> for <nav>).
        let after_tag = start + open_tag.len();
        if after_tag < lower.len() {
            let next_byte = lower.as_bytes()[after_tag];
            if !matches!(next_byte, b' ' | b'>' | b'/' | b'\n' | b'\r' | b'\t') {
                result.push_str(&html[pos..after_tag]);
                pos = after_tag;
                continue;
            }
        }

        result.push_str(&html[pos..start]);

        let end = match lower[start..].find(&close_tag) {
            Some(offset) => start + offset + close_tag.len(),
            // No closing tag: drop only the opening tag.
            None => match lower[start..].find('>') {
                Some(offset) => start + offset + 1,
                None => html.len(),
            },
        };

        pos = end;
    }

    result
}

/// Collapse every whitespace run into a single space and trim the ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep the first `max_chars` characters, appending [`TRUNCATION_MARKER`]
/// when anything was cut.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_owned(),
        Some((end, _)) => {
            let mut truncated = text[..end].to_owned();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/article";

    fn extract(html: &str) -> Result<ScrapedPage> {
        extract_page(html, URL, 1000)
    }

    #[test]
    fn extract_title_from_html() {
        let html = "<html><head><title> My Page Title </title></head>\
            <body><p>Content</p></body></html>";
        let page = extract(html).expect("should parse");
        assert_eq!(page.title, "My Page Title");
    }

    #[test]
    fn title_empty_when_missing() {
        let html = "<html><body><p>Content here</p></body></html>";
        let page = extract(html).expect("should parse");
        assert!(page.title.is_empty());
    }

    #[test]
    fn article_preferred_over_paragraphs_outside_it() {
        let html = r#"<html><body>
            <p>Outside paragraph</p>
            <article><h1>Heading</h1> Article content here</article>
        </body></html>"#;
        let page = extract(html).expect("should parse");
        assert!(page.content.contains("Article content"));
        assert!(page.content.contains("Heading"));
        assert!(!page.content.contains("Outside paragraph"));
    }

    #[test]
    fn all_containers_are_joined() {
        let html = r#"<html><body>
            <article>First article.</article>
            <main>Main area.</main>
            <div role="main">Role main.</div>
        </body></html>"#;
        let page = extract(html).expect("should parse");
        assert_eq!(page.content, "First article. Main area. Role main.");
    }

    #[test]
    fn nested_containers_are_not_duplicated() {
        let html = "<html><body><main><article>Only once</article></main></body></html>";
        let page = extract(html).expect("should parse");
        assert_eq!(page.content, "Only once");
    }

    #[test]
    fn falls_back_to_paragraphs() {
        let html = r#"<html><body>
            <div>Loose div text</div>
            <p>First paragraph.</p>
            <p>Second paragraph.</p>
        </body></html>"#;
        let page = extract(html).expect("should parse");
        assert_eq!(page.content, "First paragraph. Second paragraph.");
    }

    #[test]
    fn strips_scripts_styles_nav_footer_iframes() {
        let html = r#"<html><body>
            <nav>Nav links</nav>
            <main>
                Main content
                <script>var x = 1; alert('hi');</script>
                <style>.foo { color: red; }</style>
                <iframe src="frame.html">Framed</iframe>
            </main>
            <footer>Footer info</footer>
        </body></html>"#;
        let page = extract(html).expect("should parse");
        assert_eq!(page.content, "Main content");
    }

    #[test]
    fn nav_tag_not_confused_with_similar_tags() {
        let html = "<html><body><nav>Skip this</nav><p>Keep this</p>\
            <navigate>x</navigate></body></html>";
        let page = extract(html).expect("should parse");
        assert!(!page.content.contains("Skip this"));
        assert!(page.content.contains("Keep this"));
    }

    #[test]
    fn uppercase_tags_are_stripped() {
        let html = "<html><body><SCRIPT>evil()</SCRIPT><p>Visible</p></body></html>";
        let page = extract(html).expect("should parse");
        assert_eq!(page.content, "Visible");
    }

    #[test]
    fn whitespace_is_collapsed() {
        let html = "<html><body><p>Word1    Word2\n\n\n\tWord3</p></body></html>";
        let page = extract(html).expect("should parse");
        assert_eq!(page.content, "Word1 Word2 Word3");
    }

    #[test]
    fn long_content_truncated_with_marker() {
        let body = "word ".repeat(1000);
        let html = format!("<html><body><p>{body}</p></body></html>");
        let page = extract_page(&html, URL, 100).expect("should parse");
        assert_eq!(page.content.chars().count(), 100 + TRUNCATION_MARKER.len());
        assert!(page.content.ends_with("..."));
    }

    #[test]
    fn content_at_exact_limit_not_marked() {
        let html = "<html><body><p>abcde</p></body></html>";
        let page = extract_page(html, URL, 5).expect("should parse");
        assert_eq!(page.content, "abcde");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let body = "é".repeat(200);
        let html = format!("<html><body><p>{body}</p></body></html>");
        let page = extract_page(&html, URL, 50).expect("should parse");
        assert_eq!(page.content, format!("{}...", "é".repeat(50)));
    }

    #[test]
    fn truncation_is_deterministic() {
        let body = "lorem ipsum ".repeat(500);
        let html = format!("<html><body><p>{body}</p></body></html>");
        let first = extract_page(&html, URL, 321).expect("should parse");
        let second = extract_page(&html, URL, 321).expect("should parse");
        assert_eq!(first, second);
    }

    #[test]
    fn url_preserved_in_output() {
        let html = "<html><body><p>Content</p></body></html>";
        let page = extract_page(html, "https://test.example.com/page", 100).expect("should parse");
        assert_eq!(page.url, "https://test.example.com/page");
    }

    #[test]
    fn empty_html_returns_parse_error() {
        let err = extract("").unwrap_err();
        assert!(err.to_string().contains("no extractable content"));
    }

    #[test]
    fn only_scripts_and_styles_returns_error() {
        let html = r#"<html>
            <head><style>body{color:red}</style></head>
            <body><script>console.log('hello');</script></body>
        </html>"#;
        assert!(extract(html).is_err());
    }

    const FIXTURE_ARTICLE: &str = include_str!("../test-data/article.html");

    #[test]
    fn fixture_extracts_title_and_article() {
        let page = extract(FIXTURE_ARTICLE).expect("should parse fixture");
        assert_eq!(page.title, "Paris, Capital of France - City Guide");
        assert!(page.content.contains("Paris is the capital"));
        assert!(!page.content.contains("Sidebar teaser"));
        assert!(page.content.contains("Seine"));
    }

    #[test]
    fn fixture_strips_boilerplate() {
        let page = extract(FIXTURE_ARTICLE).expect("should parse fixture");
        assert!(!page.content.contains("window.dataLayer"));
        assert!(!page.content.contains("Home | Travel | Contact"));
        assert!(!page.content.contains("All rights reserved"));
        assert!(!page.content.contains("Subscribe to our newsletter"));
    }
}
