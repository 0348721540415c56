//! URL handling module for Company Brief
//!
//! Link resolution against the page a link was found on, and parsing of URLs
//! before they are requested.

mod resolve;

pub use resolve::{is_http, parse_page_url, resolve_link};
