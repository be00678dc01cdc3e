// ============================================================================
// mediatool-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for mediatool-core
//
// Every operation that touches an external binary can fail in a handful of
// distinct ways: bad input, the binary could not be started, it exited with a
// non-zero code, or it printed something that is not the JSON we asked for.
// These are kept as separate variants so the boundary methods on
// `MediaToolInvoker` can log a specific message for each.
//
// KEY COMPONENTS:
// - CoreError: the error enum
// - CoreResult: result alias used across the crate
// - Helper constructors for the process-related variants

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors produced by mediatool-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required argument was missing or malformed. No process was started.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The external binary could not be spawned (not found, permission denied, ...).
    #[error("Failed to launch '{program}': {source}")]
    ProcessLaunchFailure {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external binary ran and exited unsuccessfully.
    #[error("'{program}' exited with {}: {stderr}", exit_code_label(.code))]
    ProcessExitFailure {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The external binary succeeded but its output could not be interpreted.
    #[error("Failed to parse output: {0}")]
    OutputParseFailure(String),

    /// Waiting on a spawned process failed at the OS level.
    #[error("Failed waiting for '{program}': {source}")]
    ProcessWait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("'{program}' timed out after {}s", .timeout.as_secs_f64())]
    TimedOut { program: String, timeout: Duration },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for mediatool-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::OutputParseFailure(err.to_string())
    }
}

// ---- Helper constructors ----

pub fn command_start_error(program: impl Into<String>, source: io::Error) -> CoreError {
    CoreError::ProcessLaunchFailure {
        program: program.into(),
        source,
    }
}

pub fn command_failed_error(
    program: impl Into<String>,
    code: Option<i32>,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::ProcessExitFailure {
        program: program.into(),
        code,
        stderr: stderr.into(),
    }
}

pub fn command_wait_error(program: impl Into<String>, source: io::Error) -> CoreError {
    CoreError::ProcessWait {
        program: program.into(),
        source,
    }
}

/// Rejects an empty path before anything is spawned.
pub(crate) fn require_path(path: Option<&PathBuf>, what: &str) -> CoreResult<PathBuf> {
    match path {
        Some(p) if !p.as_os_str().is_empty() => Ok(p.clone()),
        _ => Err(CoreError::InvalidArgument(format!("{what} path is required"))),
    }
}
