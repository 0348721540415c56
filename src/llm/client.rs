//! OpenAI-compatible chat completions client.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::{header, Client, Response};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::{api_key_from_env, LlmConfig};
use crate::llm::streaming::FragmentParser;
use crate::llm::traits::{CompletionRequest, CompletionService, FragmentStream};
use crate::llm::types::{ChatRequest, ChatResponseRaw, Message, ResponseFormat};
use crate::{CompletionError, ConfigError};

/// Chat completions client for OpenAI and compatible gateways.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Create a client with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: model.into(),
        }
    }

    /// Create from configuration, reading the key from the configured
    /// environment variable.
    pub fn from_config(config: &LlmConfig) -> Result<Self, ConfigError> {
        let api_key = api_key_from_env(config)?;
        Ok(Self::new(api_key, config.model.clone()).with_base_url(config.base_url.clone()))
    }

    /// Set a custom base URL (Azure, proxies, local gateways).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn chat_request(&self, request: CompletionRequest, stream: bool) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(request.system_prompt),
                Message::user(request.user_prompt),
            ],
            response_format: request.json_output.then(ResponseFormat::json_object),
            stream: stream.then_some(true),
        }
    }

    /// POST a chat request and check the status.
    async fn send(&self, body: &ChatRequest) -> Result<Response, CompletionError> {
        if self.api_key.is_empty() {
            return Err(CompletionError::Config("API key is empty".into()));
        }

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Completion request failed");
                CompletionError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Completion API error");
            return Err(CompletionError::Api(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let start = std::time::Instant::now();
        let body = self.chat_request(request, false);

        let response = self.send(&body).await?;
        let chat_response: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| CompletionError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::Api("Response contained no content".into()))?;

        debug!(
            model = %self.model,
            json = body.response_format.is_some(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Chat completion"
        );

        Ok(content)
    }

    async fn complete_streaming(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, CompletionError> {
        let body = self.chat_request(request, true);
        let response = self.send(&body).await?;

        debug!(model = %self.model, "Streaming chat completion started");
        Ok(FragmentParser::new(response.bytes_stream()).boxed())
    }
}
