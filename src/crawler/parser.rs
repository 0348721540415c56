//! HTML parser for extracting page content and links
//!
//! This module turns a fetched HTML document into a [`Page`]:
//! - the page title (from the `<title>` tag)
//! - readable body text with scripts, styles, images and inputs removed
//! - outbound links, resolved to absolute URLs and deduplicated

use crate::url::resolve_link;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Title used when a page has no usable `<title>`
pub const NO_TITLE: &str = "No title found";

/// Body text used in contents blocks when a page has no text
pub const NO_CONTENT: &str = "No Content";

/// Elements whose text never reaches the extracted body
const EXCLUDED_TAGS: [&str; 4] = ["script", "style", "img", "input"];

/// A fetched and parsed web page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// The URL the page was requested from
    pub url: String,

    /// Trimmed page title, or [`NO_TITLE`]
    pub title: String,

    /// Body text, one text node per line
    pub text: String,

    /// Outbound links (absolute, first-seen order, no duplicates)
    pub links: Vec<String>,
}

impl Page {
    /// Formats the page as a labeled block for aggregation
    pub fn contents(&self) -> String {
        let text = if self.text.is_empty() {
            NO_CONTENT
        } else {
            self.text.as_str()
        };

        format!(
            "Webpage Title:\n{}\nWebpage Contents:\n{}\n\n",
            self.title, text
        )
    }
}

/// Parses HTML content into a [`Page`]
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document
///
/// **Exclude:**
/// - empty hrefs
/// - `javascript:` links and fragment-only (`#...`) links
/// - anything that doesn't resolve to `http`/`https`
/// - repeats of a link already seen on this page
///
/// Parsing is deterministic: the same HTML and base URL always produce the
/// same page.
///
/// # Example
///
/// ```
/// use company_brief::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let page = parse_page(html, &base_url);
/// assert_eq!(page.title, "Test");
/// assert_eq!(page.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_page(html: &str, base_url: &Url) -> Page {
    let document = Html::parse_document(html);

    Page {
        url: base_url.to_string(),
        title: extract_title(&document).unwrap_or_else(|| NO_TITLE.to_string()),
        text: extract_text(&document),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts readable text from the document body
///
/// Each text node is trimmed, empty nodes are dropped, and the rest are joined
/// with newlines.
fn extract_text(document: &Html) -> String {
    let Ok(body_selector) = Selector::parse("body") else {
        return String::new();
    };

    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };

    let mut lines = Vec::new();

    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let excluded = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| EXCLUDED_TAGS.contains(&element.name()))
        });
        if excluded {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    lines.join("\n")
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };

            if let Some(absolute_url) = resolve_link(href, base_url) {
                if seen.insert(absolute_url.clone()) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}
