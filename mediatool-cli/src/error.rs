// ============================================================================
// mediatool-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses the core error type. What it adds is a user-facing hint for
// the failures a person at a terminal can usually fix themselves.
//
// AI-ASSISTANT-INFO: CLI error handling utilities

// ---- Internal crate imports ----
use mediatool_core::{CoreError, CoreResult};

// ---- External crate imports ----
use owo_colors::OwoColorize;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit code for a failed operation. Usage errors exit with 2 through clap.
pub const EXIT_FAILURE: i32 = 1;

/// A hint to print after the error itself, if there is a useful one.
#[must_use]
pub fn hint_for(err: &CoreError) -> Option<String> {
    match err {
        CoreError::ProcessLaunchFailure { program, .. } => Some(format!(
            "Is {program} installed? Point to it with --ffmpeg/--ffprobe or MEDIATOOL_FFMPEG/MEDIATOOL_FFPROBE."
        )),
        CoreError::ProcessExitFailure { stderr, .. } if stderr.contains("matches no streams") => {
            Some("Run `mediatool probe --summary SOURCE` to list the available streams.".to_string())
        }
        CoreError::TimedOut { .. } => {
            Some("Raise the limit with --timeout or MEDIATOOL_TIMEOUT_SECS.".to_string())
        }
        _ => None,
    }
}

/// The `Error: ...` line printed to stderr when a command fails. It bypasses
/// the logger so a restrictive `RUST_LOG` never hides it.
#[must_use]
pub fn error_line(err: &CoreError, color: bool) -> String {
    let label = if color {
        "Error:".bright_red().bold().to_string()
    } else {
        "Error:".to_string()
    };
    format!("{label} {err}")
}
