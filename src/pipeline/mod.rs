//! Summarization pipeline
//!
//! seed URL → crawl → relevance selection → aggregation → summary completion

mod aggregator;
pub mod prompts;
mod relevance;
mod summary;

pub use aggregator::{truncate_chars, Aggregator};
pub use relevance::{parse_relevance, RelevanceResult, RelevanceSelector, RelevantLink, UNKNOWN_TYPE};
pub use summary::SummaryGenerator;
