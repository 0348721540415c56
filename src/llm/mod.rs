//! Text-completion service
//!
//! - [`CompletionService`]: the trait the pipeline depends on
//! - [`OpenAiClient`]: chat completions over HTTP, plain, JSON and streaming
//! - SSE parsing for streamed responses

mod client;
mod streaming;
mod traits;
mod types;

pub use client::OpenAiClient;
pub use streaming::FragmentParser;
pub use traits::{CompletionRequest, CompletionService, FragmentStream};
pub use types::{ChatRequest, Message, ResponseFormat};
