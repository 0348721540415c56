//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with typed, recoverable errors
//! - HTML parsing: title, body text, link extraction
//! - Depth-bounded traversal with a visited set

mod fetcher;
mod parser;
mod traversal;

pub use fetcher::{build_http_client, Fetcher};
pub use parser::{parse_page, Page, NO_CONTENT, NO_TITLE};
pub use traversal::Crawler;

use crate::config::CrawlerConfig;
use crate::state::CrawlState;
use crate::BriefError;

/// Runs a complete crawl operation
///
/// Builds a fetcher from `config`, then crawls from `seed_url` to
/// `config.max_depth`.
///
/// # Example
///
/// ```no_run
/// use company_brief::config::CrawlerConfig;
/// use company_brief::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let state = crawl("https://example.com/", &CrawlerConfig::default()).await?;
/// for link in state.links() {
///     println!("{}", link);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed_url: &str, config: &CrawlerConfig) -> Result<CrawlState, BriefError> {
    let fetcher = Fetcher::new(config)?;
    let crawler = Crawler::from_config(fetcher, config);
    Ok(crawler.crawl(seed_url, config.max_depth).await)
}
