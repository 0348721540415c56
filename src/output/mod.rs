//! Output module for delivering summaries
//!
//! This module handles writing the generated summary to a terminal or any
//! other `Write` sink, either all at once or incrementally.

mod mode;

pub use mode::OutputMode;
