//! Depth-bounded site traversal
//!
//! The crawler walks a site depth-first from a seed page using an explicit
//! worklist of `(url, depth)` pairs, so deep or cyclic link graphs never grow
//! the call stack. Fetches are sequential: each page is awaited before the next
//! one starts.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::Page;
use crate::state::CrawlState;

/// Depth-bounded, duplicate-avoiding crawler
#[derive(Debug, Clone)]
pub struct Crawler {
    fetcher: Fetcher,
    max_pages: usize,
}

impl Crawler {
    /// Creates a crawler that fetches at most `max_pages` pages per crawl
    pub fn new(fetcher: Fetcher, max_pages: usize) -> Self {
        Self { fetcher, max_pages }
    }

    /// Creates a crawler from configuration
    pub fn from_config(fetcher: Fetcher, config: &CrawlerConfig) -> Self {
        Self::new(fetcher, config.max_pages)
    }

    /// Crawls from `seed_url` down to `max_depth`
    ///
    /// The seed is depth 1 and is always fetched. A seed that can't be fetched
    /// yields a state with the seed visited and no links.
    pub async fn crawl(&self, seed_url: &str, max_depth: u32) -> CrawlState {
        match self.fetcher.fetch(seed_url).await {
            Ok(seed) => self.crawl_from(seed, max_depth).await,
            Err(e) => {
                tracing::warn!("Seed page unavailable, nothing to crawl: {}", e);
                let mut state = CrawlState::new(seed_url, max_depth);
                state.mark_visited(seed_url);
                state.record_failure();
                state
            }
        }
    }

    /// Crawls from an already fetched seed page
    ///
    /// # Depth rules
    ///
    /// | Depth | Fetched | Links recorded |
    /// |-------|---------|----------------|
    /// | 1 (seed) | always | if `max_depth >= 1` |
    /// | `2..=max_depth` | yes | yes |
    /// | `> max_depth` | no, marked visited only | no |
    ///
    /// Traversal stops once `max_pages` fetches have been attempted.
    pub async fn crawl_from(&self, seed: Page, max_depth: u32) -> CrawlState {
        let mut state = CrawlState::new(seed.url.clone(), max_depth);
        let mut worklist: Vec<(String, u32)> = Vec::new();

        state.mark_visited(&seed.url);
        state.record_fetch();
        tracing::debug!("Crawling {} (max depth {})", seed.url, max_depth);
        record_links(&mut state, &mut worklist, &seed, 1);

        while let Some((url, depth)) = worklist.pop() {
            if !state.mark_visited(&url) {
                continue;
            }

            if depth > max_depth {
                tracing::trace!("Depth {} exceeds limit, not fetching {}", depth, url);
                continue;
            }

            if state.fetch_attempts() >= self.max_pages {
                tracing::warn!(
                    "Page limit of {} reached, stopping crawl of {}",
                    self.max_pages,
                    state.seed_url
                );
                state.mark_page_limit_hit();
                break;
            }

            tracing::debug!("Depth {}: {}", depth, url);

            match self.fetcher.fetch(&url).await {
                Ok(page) => {
                    state.record_fetch();
                    // A redirect target counts as visited too
                    if page.url != url {
                        state.mark_visited(&page.url);
                    }
                    record_links(&mut state, &mut worklist, &page, depth);
                }
                Err(e) => {
                    state.record_failure();
                    tracing::warn!("Skipping page: {}", e);
                }
            }
        }

        tracing::info!(
            "Crawl of {} finished: {} pages fetched, {} failed, {} links found",
            state.seed_url,
            state.pages_fetched(),
            state.failed_fetches(),
            state.links().len()
        );

        state
    }
}

/// Records a page's unvisited links and queues them one level deeper
///
/// Links are pushed in reverse so they pop in page order, which keeps the walk
/// identical to a recursive depth-first traversal.
fn record_links(
    state: &mut CrawlState,
    worklist: &mut Vec<(String, u32)>,
    page: &Page,
    depth: u32,
) {
    if depth > state.max_depth {
        return;
    }

    let fresh: Vec<&String> = page
        .links
        .iter()
        .filter(|link| !state.is_visited(link))
        .collect();

    for link in &fresh {
        state.add_link(link);
    }

    for link in fresh.into_iter().rev() {
        worklist.push((link.clone(), depth + 1));
    }
}
