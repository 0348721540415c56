use crate::output::OutputMode;
use serde::Deserialize;

/// Main configuration structure for Company Brief
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum link depth; the seed page is depth 1
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Upper bound on pages fetched in a single crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every page request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            request_timeout_secs: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Text-completion service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Model name passed to the chat completions endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of an OpenAI-compatible API
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// What to do when the relevance completion returns something unusable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelevancePolicy {
    /// Abort the run
    #[default]
    Strict,
    /// Continue with landing-page content only
    Degrade,
}

/// Summary generation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    /// Character budget for the aggregated page content
    #[serde(rename = "content-limit", default = "default_content_limit")]
    pub content_limit: usize,

    #[serde(rename = "relevance-policy", default)]
    pub relevance_policy: RelevancePolicy,

    #[serde(default)]
    pub output: OutputMode,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            content_limit: default_content_limit(),
            relevance_policy: RelevancePolicy::default(),
            output: OutputMode::default(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Display name used in the welcome route and logs
    #[serde(rename = "app-name", default = "default_app_name")]
    pub app_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            app_name: default_app_name(),
        }
    }
}

fn default_max_depth() -> u32 {
    1
}

fn default_max_pages() -> usize {
    100
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("company-brief/{}", env!("CARGO_PKG_VERSION"))
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_content_limit() -> usize {
    20_000
}

fn default_bind() -> String {
    "127.0.0.1:8002".to_string()
}

fn default_app_name() -> String {
    "Company Brief".to_string()
}
