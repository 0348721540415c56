//! The text-completion seam
//!
//! Everything that talks to a language model goes through
//! [`CompletionService`], so the pipeline can run against the real API or a
//! canned implementation in tests.

use crate::CompletionError;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Incremental completion output
pub type FragmentStream = BoxStream<'static, Result<String, CompletionError>>;

/// A single prompt pair sent to the completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,

    /// Ask the service for a JSON object response
    pub json_output: bool,
}

impl CompletionRequest {
    /// Creates a plain-text request
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            json_output: false,
        }
    }

    /// Requests structured JSON output
    pub fn json(mut self) -> Self {
        self.json_output = true;
        self
    }
}

/// A remote text-completion service
///
/// Calls are fallible and never retried.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the whole completion at once
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;

    /// Returns the completion as a stream of text fragments
    async fn complete_streaming(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, CompletionError>;
}
