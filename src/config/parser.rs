use crate::config::types::{Config, LlmConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use company_brief::config::load_config;
///
/// let config = load_config(Path::new("brief.toml")).unwrap();
/// println!("Max depth: {}", config.crawler.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Resolves the effective configuration for a run
///
/// Reads `path` when given (defaults otherwise), then applies environment
/// overrides. A `.env` file in the working directory is loaded first if present.
pub fn resolve_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    if let Ok(dotenv_path) = dotenvy::dotenv() {
        tracing::debug!("Loaded environment from {}", dotenv_path.display());
    }

    let mut config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    validate(&config)?;

    Ok(config)
}

/// Applies environment overrides using the supplied lookup
///
/// * `MODEL` replaces `llm.model`
/// * `OPENAI_BASE_URL` replaces `llm.base-url`
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(model) = lookup("MODEL").filter(|m| !m.trim().is_empty()) {
        config.llm.model = model;
    }

    if let Some(base_url) = lookup("OPENAI_BASE_URL").filter(|u| !u.trim().is_empty()) {
        config.llm.base_url = base_url;
    }
}

/// Reads the API key named by `llm.api-key-env`
///
/// Keys that don't look like OpenAI project keys are accepted but logged,
/// since OpenAI-compatible gateways issue other formats.
pub fn api_key_from_env(config: &LlmConfig) -> Result<String, ConfigError> {
    let var = &config.api_key_env;
    let key = std::env::var(var)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingApiKey(var.clone()))?;

    if !key.starts_with("sk-") {
        tracing::warn!("API key in {} is not prefixed with 'sk-'", var);
    }

    Ok(key)
}
