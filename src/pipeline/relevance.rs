//! Relevance selection
//!
//! Hands the crawled link list to the completion service and reads back the
//! labeled subset worth summarizing.

use crate::config::RelevancePolicy;
use crate::llm::{CompletionRequest, CompletionService};
use crate::pipeline::prompts::{relevance_user_prompt, RELEVANCE_SYSTEM_PROMPT};
use crate::url::resolve_link;
use crate::{PipelineError, RelevanceParseError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// Label used when the service omits a link's type
pub const UNKNOWN_TYPE: &str = "Unknown Type";

/// A link the completion service picked, with its label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevantLink {
    /// Free-form label, e.g. "about page"
    #[serde(rename = "type")]
    pub kind: String,

    pub url: String,
}

/// Ordered result of relevance selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelevanceResult {
    pub links: Vec<RelevantLink>,
}

impl RelevanceResult {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
}

/// Parses a relevance completion
///
/// The response must be a JSON object with a `links` array. Entries without a
/// string `url` are skipped; a missing `type` becomes [`UNKNOWN_TYPE`].
pub fn parse_relevance(content: &str) -> Result<RelevanceResult, RelevanceParseError> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    let entries = value
        .as_object()
        .and_then(|object| object.get("links"))
        .and_then(|links| links.as_array())
        .ok_or(RelevanceParseError::MissingLinks)?;

    let mut links = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(url) = entry.get("url").and_then(|u| u.as_str()) else {
            tracing::warn!("Skipping relevance entry without a url: {}", entry);
            continue;
        };

        let kind = entry
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or(UNKNOWN_TYPE);

        links.push(RelevantLink {
            kind: kind.to_string(),
            url: url.to_string(),
        });
    }

    Ok(RelevanceResult { links })
}

/// Picks summary-worthy links through the completion service
#[derive(Clone)]
pub struct RelevanceSelector {
    completion: Arc<dyn CompletionService>,
    policy: RelevancePolicy,
}

impl RelevanceSelector {
    pub fn new(completion: Arc<dyn CompletionService>, policy: RelevancePolicy) -> Self {
        Self { completion, policy }
    }

    /// Asks the completion service which of `links` matter
    ///
    /// # Errors
    ///
    /// * `PipelineError::Completion` - the call itself failed (always fatal)
    /// * `PipelineError::RelevanceParse` - unusable response under
    ///   [`RelevancePolicy::Strict`]; under [`RelevancePolicy::Degrade`] an empty
    ///   result is returned instead
    pub async fn select(
        &self,
        seed_url: &str,
        links: &[String],
    ) -> Result<RelevanceResult, PipelineError> {
        tracing::info!("Selecting relevant links among {} found", links.len());

        let request = CompletionRequest::new(
            RELEVANCE_SYSTEM_PROMPT,
            relevance_user_prompt(seed_url, links),
        )
        .json();

        let content = self.completion.complete(request).await?;
        tracing::debug!("Relevance response: {}", content);

        let result = match parse_relevance(&content) {
            Ok(result) => result,
            Err(e) => match self.policy {
                RelevancePolicy::Strict => {
                    tracing::error!("Unusable relevance response: {}", e);
                    return Err(e.into());
                }
                RelevancePolicy::Degrade => {
                    tracing::warn!(
                        "Unusable relevance response, continuing with landing page only: {}",
                        e
                    );
                    RelevanceResult::default()
                }
            },
        };

        let result = absolutize(result, seed_url);
        tracing::info!("{} relevant links selected", result.len());

        Ok(result)
    }
}

/// Resolves relative URLs in the result against the seed
///
/// Entries that can't be turned into an http(s) URL are dropped.
fn absolutize(result: RelevanceResult, seed_url: &str) -> RelevanceResult {
    let Ok(base) = Url::parse(seed_url) else {
        return result;
    };

    let links = result
        .links
        .into_iter()
        .filter_map(|link| match resolve_link(&link.url, &base) {
            Some(url) => Some(RelevantLink { url, ..link }),
            None => {
                tracing::warn!("Dropping unusable relevant link: {}", link.url);
                None
            }
        })
        .collect();

    RelevanceResult { links }
}
