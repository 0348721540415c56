//! Link resolution
//!
//! Turns raw `href` attribute values into absolute URLs relative to the page
//! they were found on.

use crate::FetchError;
use url::Url;

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - empty hrefs
/// - `javascript:` links
/// - fragment-only links (`#...`)
/// - hrefs that don't resolve to an `http`/`https` URL
///
/// Absolute `http://` and `https://` hrefs are returned verbatim (trimmed) so the
/// link list reflects what the site actually published. Fragments are always
/// dropped: `/about` and `/about#team` are the same page.
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:") || href.starts_with('#') {
        return None;
    }

    if href.starts_with("http://") || href.starts_with("https://") {
        let without_fragment = href.split('#').next().unwrap_or(href);
        return Some(without_fragment.to_string());
    }

    match base_url.join(href) {
        Ok(mut absolute_url) if is_http(&absolute_url) => {
            absolute_url.set_fragment(None);
            Some(absolute_url.to_string())
        }
        _ => None,
    }
}

/// Parses a URL that is about to be requested
pub fn parse_page_url(url: &str) -> Result<Url, FetchError> {
    Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

/// Returns true for `http` and `https` URLs
pub fn is_http(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}
