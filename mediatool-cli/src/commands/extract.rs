//! Implementation of the `thumbnail`, `audio` and `subtitle` subcommands.
//!
//! Each maps its arguments onto a `MediaOperationRequest` and runs the typed
//! `try_*` operation so the caller sees why it failed.

use crate::cli::{ThumbnailArgs, TrackArgs};
use crate::error::CliResult;

use mediatool_core::{CommandRunner, MediaOperationRequest, MediaToolInvoker};

/// Which kind of track a `TrackArgs` command extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Subtitle,
}

pub fn run_thumbnail<R: CommandRunner>(
    invoker: &MediaToolInvoker<R>,
    args: &ThumbnailArgs,
) -> CliResult<()> {
    let mut request = MediaOperationRequest::with_paths(&args.source, &args.dest);
    if let Some(ts) = &args.timestamp {
        request = request.timestamp(ts.clone());
    }
    invoker.try_extract_thumbnail(&request)
}

pub fn run_track<R: CommandRunner>(
    invoker: &MediaToolInvoker<R>,
    kind: TrackKind,
    args: &TrackArgs,
) -> CliResult<()> {
    let mut request = MediaOperationRequest::with_paths(&args.source, &args.dest);
    if let Some(index) = args.stream {
        request = request.stream_index(index);
    }
    match kind {
        TrackKind::Audio => invoker.try_extract_audio_track(&request),
        TrackKind::Subtitle => invoker.try_extract_subtitle_track(&request),
    }
}
