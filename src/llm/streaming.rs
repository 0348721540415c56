//! SSE streaming parser for chat completions.
//!
//! Converts a raw `reqwest` byte stream into text fragments. Handles
//! `data: [DONE]`, lines split across chunks, and empty deltas.

use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::CompletionError;

/// Raw streaming chunk from the API.
#[derive(Debug, serde::Deserialize)]
struct StreamChunkRaw {
    #[serde(default)]
    choices: Vec<StreamChoiceRaw>,
}

#[derive(Debug, serde::Deserialize)]
struct StreamChoiceRaw {
    #[serde(default)]
    delta: Option<DeltaRaw>,
}

#[derive(Debug, serde::Deserialize)]
struct DeltaRaw {
    #[serde(default)]
    content: Option<String>,
}

/// What a single SSE line turned into.
enum Line {
    Fragment(String),
    Done,
    Skip,
}

/// Stream adapter yielding the non-empty content deltas of an SSE response.
pub struct FragmentParser<S> {
    inner: Pin<Box<S>>,
    buffer: Vec<u8>,
    done: bool,
}

impl<S> FragmentParser<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send,
{
    pub fn new(byte_stream: S) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: Vec::new(),
            done: false,
        }
    }

    /// Pops the next complete line off the buffer and interprets it.
    fn next_from_buffer(&mut self, flush: bool) -> Option<Result<String, CompletionError>> {
        loop {
            let line = match self.buffer.iter().position(|b| *b == b'\n') {
                Some(pos) => self.buffer.drain(..=pos).collect::<Vec<u8>>(),
                None if flush && !self.buffer.is_empty() => std::mem::take(&mut self.buffer),
                None => return None,
            };

            let line = match std::str::from_utf8(&line) {
                Ok(text) => text.trim().to_string(),
                Err(e) => {
                    return Some(Err(CompletionError::Parse(format!(
                        "Invalid UTF-8 in stream: {}",
                        e
                    ))))
                }
            };

            match parse_line(&line) {
                Ok(Line::Fragment(text)) => return Some(Ok(text)),
                Ok(Line::Done) => {
                    self.done = true;
                    return None;
                }
                Ok(Line::Skip) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<S> Stream for FragmentParser<S>
where
    S: Stream<Item = Result<Bytes, reqwest::Error>> + Send,
{
    type Item = Result<String, CompletionError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.done {
                return Poll::Ready(None);
            }

            if let Some(item) = this.next_from_buffer(false) {
                return Poll::Ready(Some(item));
            }
            if this.done {
                return Poll::Ready(None);
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => this.buffer.extend_from_slice(&bytes),
                Poll::Ready(Some(Err(e))) => {
                    this.done = true;
                    return Poll::Ready(Some(Err(CompletionError::Network(e.to_string()))));
                }
                Poll::Ready(None) => {
                    // Stream ended without [DONE]; drain whatever is left
                    let item = this.next_from_buffer(true);
                    this.done = true;
                    return Poll::Ready(item);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Interprets one trimmed SSE line.
fn parse_line(line: &str) -> Result<Line, CompletionError> {
    // Blank separators and "event:", "id:", "retry:" lines
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(Line::Skip);
    };
    let data = data.trim();

    if data == "[DONE]" {
        return Ok(Line::Done);
    }

    let raw: StreamChunkRaw = serde_json::from_str(data).map_err(|e| {
        CompletionError::Parse(format!(
            "Failed to parse stream chunk: {} (data: {})",
            e,
            data.chars().take(200).collect::<String>()
        ))
    })?;

    let content = raw
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta)
        .and_then(|d| d.content)
        .unwrap_or_default();

    if content.is_empty() {
        Ok(Line::Skip)
    } else {
        Ok(Line::Fragment(content))
    }
}
