//! Configuration module for Company Brief
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! and layering environment overrides on top.
//!
//! # Example
//!
//! ```no_run
//! use company_brief::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("brief.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, LlmConfig, RelevancePolicy, ServerConfig, SummaryConfig};

// Re-export parser functions
pub use parser::{api_key_from_env, apply_env_overrides, load_config, parse_config, resolve_config};
