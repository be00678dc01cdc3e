//! FFprobe integration for media metadata extraction
//!
//! Builds the `ffprobe -print_format json` invocation and turns its output into
//! a `MediaMetadata`. A non-zero exit and unparsable stdout are reported as
//! different errors so callers can log them differently.

use super::{CommandOutput, CommandRunner, Invocation};
use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::media::MediaMetadata;

use std::path::Path;

/// `ffprobe -v quiet -print_format json -show_format -show_streams SRC`
#[must_use]
pub fn build_probe_invocation(ffprobe: &Path, source: &Path) -> Invocation {
    let mut inv = Invocation::new(ffprobe);
    inv.args(["-v", "quiet"]);
    inv.args(["-print_format", "json"]);
    inv.arg("-show_format");
    inv.arg("-show_streams");
    inv.arg(source);
    inv
}

/// Interprets a finished ffprobe run.
///
/// The exit code is checked first: a failed run never yields a document, even
/// if it printed valid JSON.
pub fn parse_probe_output(program: &str, output: &CommandOutput) -> CoreResult<MediaMetadata> {
    if !output.success() {
        return Err(command_failed_error(
            program,
            output.exit_code,
            output.stderr_lossy().trim(),
        ));
    }

    if output.stdout.iter().all(u8::is_ascii_whitespace) {
        return Err(CoreError::OutputParseFailure(format!(
            "{program} exited successfully but printed no JSON"
        )));
    }

    serde_json::from_slice::<MediaMetadata>(&output.stdout).map_err(|e| {
        CoreError::OutputParseFailure(format!("{program} output is not a metadata document: {e}"))
    })
}

/// Runs ffprobe on `source` and parses the result.
pub fn probe_media<R: CommandRunner + ?Sized>(
    runner: &R,
    ffprobe: &Path,
    source: &Path,
    cancel: Option<&CancellationToken>,
) -> CoreResult<MediaMetadata> {
    let invocation = build_probe_invocation(ffprobe, source);
    log::debug!("Running ffprobe for metadata on: {}", source.display());
    let output = runner.run(&invocation, cancel)?;
    let metadata = parse_probe_output(&invocation.program_name(), &output)?;
    log::debug!(
        "ffprobe reported {} stream(s) for {}",
        metadata.streams.len(),
        source.display()
    );
    Ok(metadata)
}
