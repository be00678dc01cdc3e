//! Implementation of the `info` subcommand.
//!
//! Reports which ffmpeg/ffprobe binaries will be used, their version lines and
//! whether hardware decoding will be requested. Fails if either binary cannot
//! be run.

use crate::error::CliResult;

use mediatool_core::{CommandRunner, HwAccelMode, MediaToolInvoker};
use std::io::Write;

pub fn run_info<R: CommandRunner, W: Write>(
    invoker: &MediaToolInvoker<R>,
    out: &mut W,
) -> CliResult<()> {
    let mut first_error = None;
    let mut ffmpeg_ok = false;

    for (i, (program, result)) in invoker.check_dependencies().into_iter().enumerate() {
        let label = if i == 0 { "ffmpeg" } else { "ffprobe" };
        match result {
            Ok(version) => {
                writeln!(out, "{label:<8} {} ({version})", program.display())?;
                ffmpeg_ok |= i == 0;
            }
            Err(e) => {
                writeln!(out, "{label:<8} {} (unavailable: {e})", program.display())?;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    let policy = invoker.hardware_decode_policy();
    writeln!(
        out,
        "Hardware decoding: mode {}, method {}",
        policy.mode(),
        policy.method()
    )?;

    // Auto mode would probe a binary we already know is missing.
    let decoding = if ffmpeg_ok || policy.mode() != HwAccelMode::Auto {
        invoker
            .hardware_decoding()
            .map_or_else(|| "software".to_string(), |m| format!("-hwaccel {m}"))
    } else {
        "software (ffmpeg unavailable)".to_string()
    };
    writeln!(out, "Decoding with: {decoding}")?;

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
