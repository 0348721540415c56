//! Crawl state for a single traversal
//!
//! Owned by one crawl invocation and discarded afterwards; nothing here is
//! shared between concurrent pipeline runs.

use std::collections::HashSet;

/// Everything a crawl learned about a site
#[derive(Debug, Clone)]
pub struct CrawlState {
    /// The URL the traversal started from
    pub seed_url: String,

    /// Maximum link depth (seed is depth 1)
    pub max_depth: u32,

    visited: HashSet<String>,
    visit_order: Vec<String>,
    links: Vec<String>,
    link_set: HashSet<String>,
    pages_fetched: usize,
    failed_fetches: usize,
    page_limit_hit: bool,
}

impl CrawlState {
    /// Creates an empty state for a crawl from `seed_url`
    pub fn new(seed_url: impl Into<String>, max_depth: u32) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_depth,
            visited: HashSet::new(),
            visit_order: Vec::new(),
            links: Vec::new(),
            link_set: HashSet::new(),
            pages_fetched: 0,
            failed_fetches: 0,
            page_limit_hit: false,
        }
    }

    /// Marks a URL visited
    ///
    /// Returns false if it was already visited, in which case nothing changes.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.insert(url.to_string()) {
            self.visit_order.push(url.to_string());
            true
        } else {
            false
        }
    }

    /// Returns true if the URL has been visited
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Records a discovered link
    ///
    /// Returns false if the link was already recorded.
    pub fn add_link(&mut self, url: &str) -> bool {
        if self.link_set.insert(url.to_string()) {
            self.links.push(url.to_string());
            true
        } else {
            false
        }
    }

    /// Accumulated links in discovery order
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// Visited URLs in visit order
    pub fn visited(&self) -> &[String] {
        &self.visit_order
    }

    /// Number of visited URLs
    pub fn visited_count(&self) -> usize {
        self.visit_order.len()
    }

    pub fn record_fetch(&mut self) {
        self.pages_fetched += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed_fetches += 1;
    }

    pub fn mark_page_limit_hit(&mut self) {
        self.page_limit_hit = true;
    }

    /// Pages successfully fetched during the crawl
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetches that failed and were skipped
    pub fn failed_fetches(&self) -> usize {
        self.failed_fetches
    }

    /// Total fetch attempts, successful or not
    pub fn fetch_attempts(&self) -> usize {
        self.pages_fetched + self.failed_fetches
    }

    /// True if the crawl stopped early because of the page cap
    pub fn page_limit_hit(&self) -> bool {
        self.page_limit_hit
    }
}
