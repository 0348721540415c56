//! Summary delivery modes
//!
//! A summary is delivered either in one piece once the completion finishes, or
//! fragment by fragment as the service produces it.

use crate::llm::{CompletionRequest, CompletionService};
use crate::PipelineError;
use futures::StreamExt;
use serde::Deserialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// How the summary completion reaches the reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Wait for the full completion, then write it
    #[default]
    Standard,
    /// Write each fragment as soon as it arrives
    Streaming,
}

impl OutputMode {
    /// Runs the completion and writes it to `out`
    ///
    /// Returns the full summary text in both modes.
    pub async fn deliver<W: Write>(
        self,
        completion: &dyn CompletionService,
        request: CompletionRequest,
        out: &mut W,
    ) -> Result<String, PipelineError> {
        match self {
            Self::Standard => {
                let summary = completion.complete(request).await?;
                writeln!(out, "{}", summary)?;
                out.flush()?;
                Ok(summary)
            }
            Self::Streaming => {
                let mut stream = completion.complete_streaming(request).await?;
                let mut summary = String::new();

                while let Some(fragment) = stream.next().await {
                    let fragment = fragment?;
                    out.write_all(fragment.as_bytes())?;
                    out.flush()?;
                    summary.push_str(&fragment);
                }

                writeln!(out)?;
                out.flush()?;
                Ok(summary)
            }
        }
    }

    /// Converts to the string used in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Streaming => "streaming",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "streaming" | "stream" => Ok(Self::Streaming),
            other => Err(format!("unknown output mode '{}'", other)),
        }
    }
}
