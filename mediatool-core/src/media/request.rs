//! Operation requests handed to `MediaToolInvoker`.

use crate::cancellation::CancellationToken;
use std::fmt;
use std::path::PathBuf;

/// The four operations the invoker knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOperation {
    Thumbnail,
    AudioTrack,
    SubtitleTrack,
    Probe,
}

impl fmt::Display for MediaOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaOperation::Thumbnail => "thumbnail extraction",
            MediaOperation::AudioTrack => "audio extraction",
            MediaOperation::SubtitleTrack => "subtitle extraction",
            MediaOperation::Probe => "metadata probe",
        };
        f.write_str(name)
    }
}

/// Inputs for a single operation.
///
/// Only the source is always required. The invoker checks what each operation
/// needs before starting anything; a destination on a probe request is ignored.
#[derive(Debug, Clone, Default)]
pub struct MediaOperationRequest {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    /// Per-type stream index (`0:a:N` / `0:s:N`)
    pub stream_index: Option<u32>,
    /// Thumbnail seek position, `HH:MM:SS`
    pub timestamp: Option<String>,
    pub cancel: Option<CancellationToken>,
}

impl MediaOperationRequest {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    /// Shorthand for a request with both source and destination.
    pub fn with_paths(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self::new(source).destination(destination)
    }

    #[must_use]
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    #[must_use]
    pub fn stream_index(mut self, index: u32) -> Self {
        self.stream_index = Some(index);
        self
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    #[must_use]
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
