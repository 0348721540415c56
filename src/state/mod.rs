//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: visited set, accumulated links and fetch counters for one
//!   traversal

mod crawl_state;

pub use crawl_state::CrawlState;
