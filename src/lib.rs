//! Company Brief: crawl a company website and summarize it
//!
//! This crate crawls a site to a bounded depth, asks a text-completion service
//! which of the discovered links matter for a company overview, fetches those
//! pages, and feeds the aggregated text into a summary completion.

pub mod config;
pub mod crawler;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Company Brief operations
#[derive(Debug, Error)]
pub enum BriefError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("API key not set: expected environment variable {0}")]
    MissingApiKey(String),
}

/// Failure to retrieve a single page
///
/// Always recoverable for inner links: the crawler and aggregator log it and
/// move on. Only a failing seed page aborts a pipeline run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Unsupported content type '{content_type}' for {url}")]
    ContentType { url: String, content_type: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: ::url::ParseError,
    },
}

impl FetchError {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Status { url, .. }
            | Self::ContentType { url, .. }
            | Self::Timeout { url }
            | Self::Network { url, .. }
            | Self::InvalidUrl { url, .. } => url,
        }
    }
}

/// Malformed response from the relevance-selection completion
#[derive(Debug, Error)]
pub enum RelevanceParseError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Response has no `links` array")]
    MissingLinks,
}

/// Text-completion service errors
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Missing API key or otherwise unusable client settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the service
    #[error("API error: {0}")]
    Api(String),

    /// Unexpected response body
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors that abort a summarization run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Seed page unavailable: {0}")]
    SeedFetch(#[from] FetchError),

    #[error("Relevance selection failed: {0}")]
    RelevanceParse(#[from] RelevanceParseError),

    #[error("Completion service failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Company Brief operations
pub type Result<T> = std::result::Result<T, BriefError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, Fetcher, Page};
pub use llm::{CompletionRequest, CompletionService, OpenAiClient};
pub use output::OutputMode;
pub use pipeline::{Aggregator, RelevanceResult, RelevanceSelector, SummaryGenerator};
pub use state::CrawlState;
