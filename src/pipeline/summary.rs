//! Summary generation
//!
//! Wraps the aggregator and the summary completion. The CLI delivers through
//! an [`OutputMode`]; the HTTP server takes the raw fragment stream.

use crate::config::Config;
use crate::crawler::Fetcher;
use crate::llm::{CompletionRequest, CompletionService, FragmentStream};
use crate::output::OutputMode;
use crate::pipeline::aggregator::Aggregator;
use crate::pipeline::prompts::{summary_user_prompt, SUMMARY_SYSTEM_PROMPT};
use crate::pipeline::relevance::RelevanceSelector;
use crate::PipelineError;
use std::io::Write;
use std::sync::Arc;

/// Produces a markdown company summary from a website
#[derive(Clone)]
pub struct SummaryGenerator {
    aggregator: Aggregator,
    completion: Arc<dyn CompletionService>,
}

impl SummaryGenerator {
    pub fn new(aggregator: Aggregator, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            aggregator,
            completion,
        }
    }

    /// Wires up selector, crawler and aggregator from `config`
    pub fn from_config(
        config: &Config,
        fetcher: Fetcher,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        let selector = RelevanceSelector::new(completion.clone(), config.summary.relevance_policy);
        let aggregator = Aggregator::from_config(config, fetcher, selector);
        Self::new(aggregator, completion)
    }

    /// Crawls, selects and aggregates, returning the summary request
    pub async fn prepare(
        &self,
        company_name: &str,
        url: &str,
    ) -> Result<CompletionRequest, PipelineError> {
        tracing::info!("Attempting to summarize web content for {}: {}", company_name, url);

        match self.aggregator.aggregate(url).await {
            Ok(content) => Ok(CompletionRequest::new(
                SUMMARY_SYSTEM_PROMPT,
                summary_user_prompt(company_name, &content),
            )),
            Err(e) => {
                tracing::error!(
                    "Error summarizing web content for {}: {} --> {}",
                    company_name,
                    url,
                    e
                );
                Err(e)
            }
        }
    }

    /// Generates the summary and writes it to `out` using `mode`
    pub async fn generate<W: Write>(
        &self,
        company_name: &str,
        url: &str,
        mode: OutputMode,
        out: &mut W,
    ) -> Result<String, PipelineError> {
        let request = self.prepare(company_name, url).await?;

        let summary = mode
            .deliver(self.completion.as_ref(), request, out)
            .await
            .inspect_err(|e| tracing::error!("Error in {} output --> {}", mode, e))?;

        tracing::info!("Successfully summarized web content for {}: {}", company_name, url);
        Ok(summary)
    }

    /// Generates the summary as a fragment stream
    ///
    /// Fails before any fragment is produced if the pipeline or the opening of
    /// the stream fails.
    pub async fn stream(
        &self,
        company_name: &str,
        url: &str,
    ) -> Result<FragmentStream, PipelineError> {
        let request = self.prepare(company_name, url).await?;
        let stream = self.completion.complete_streaming(request).await?;
        Ok(stream)
    }
}
