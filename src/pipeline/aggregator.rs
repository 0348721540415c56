//! Content aggregation
//!
//! Gathers the landing page and every relevance-selected page into one
//! labeled, size-capped block of text for the summary completion.

use crate::config::Config;
use crate::crawler::{Crawler, Fetcher};
use crate::pipeline::relevance::RelevanceSelector;
use crate::PipelineError;

/// Fetches, labels and concatenates summary source pages
#[derive(Clone)]
pub struct Aggregator {
    fetcher: Fetcher,
    crawler: Crawler,
    selector: RelevanceSelector,
    max_depth: u32,
    content_limit: usize,
}

impl Aggregator {
    pub fn new(
        fetcher: Fetcher,
        crawler: Crawler,
        selector: RelevanceSelector,
        max_depth: u32,
        content_limit: usize,
    ) -> Self {
        Self {
            fetcher,
            crawler,
            selector,
            max_depth,
            content_limit,
        }
    }

    /// Creates an aggregator with crawl depth, page cap and content limit from
    /// `config`
    pub fn from_config(config: &Config, fetcher: Fetcher, selector: RelevanceSelector) -> Self {
        let crawler = Crawler::from_config(fetcher.clone(), &config.crawler);
        Self::new(
            fetcher,
            crawler,
            selector,
            config.crawler.max_depth,
            config.summary.content_limit,
        )
    }

    /// Builds the summary source text for `seed_url`
    ///
    /// 1. Fetch the seed page (failure aborts the run)
    /// 2. Crawl the site from it
    /// 3. Select relevant links
    /// 4. Fetch each selected page; failures become a placeholder note
    /// 5. Truncate to the content limit
    pub async fn aggregate(&self, seed_url: &str) -> Result<String, PipelineError> {
        let seed = self.fetcher.fetch(seed_url).await.map_err(|e| {
            tracing::error!("Could not fetch landing page: {}", e);
            PipelineError::SeedFetch(e)
        })?;
        tracing::info!("Landing page title: {}", seed.title);

        let mut sections = vec![seed.contents()];
        let seed_url = seed.url.clone();

        let state = self.crawler.crawl_from(seed, self.max_depth).await;
        tracing::info!("Total links found: {}", state.links().len());

        let relevant = self.selector.select(&seed_url, state.links()).await?;

        for link in &relevant.links {
            tracing::debug!("Processing relevant link: {} ({})", link.url, link.kind);
            sections.push(format!("\n\n{}", link.kind));

            match self.fetcher.fetch(&link.url).await {
                Ok(page) => sections.push(page.contents()),
                Err(e) => {
                    tracing::warn!("Relevant page skipped: {}", e);
                    sections.push(format!("Could not fetch {}: {}\n\n", link.url, e));
                }
            }
        }

        let content = sections.join("\n");
        tracing::info!("Aggregated content length: {} chars", content.chars().count());

        Ok(truncate_chars(&content, self.content_limit))
    }
}

/// Returns the first `limit` characters of `text`
///
/// A plain character cutoff: sections and words may be cut mid-way.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
