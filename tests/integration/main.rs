//! Integration tests for Company Brief
//!
//! These tests use wiremock for the crawled website and a canned completion
//! service in place of the language model.

mod crawl_tests;
mod server_tests;
mod support;
