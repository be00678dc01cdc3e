// ============================================================================
// mediatool-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg and ffprobe Binaries
//
// This module owns the process-execution seam. Everything that starts an
// external program goes through the `CommandRunner` trait, so the invoker can
// be driven by the real `ProcessRunner` in production and by
// `MockCommandRunner` in tests.
//
// KEY COMPONENTS:
// - Invocation / CommandOutput: what to run and what came back
// - CommandRunner: trait implemented by the real and mock runners
// - Argument builders for ffmpeg (ffmpeg_builder) and ffprobe (ffprobe_executor)
// - Dependency checking for the `info` command

// ---- Internal crate imports ----
use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Builds ffmpeg argument lists for the extraction operations
pub mod ffmpeg_builder;

/// Builds the ffprobe invocation and interprets its JSON output
pub mod ffprobe_executor;

/// Scripted runner for tests and embedders without real binaries
pub mod mocks;

/// std::process backed runner
pub mod runner;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg_builder::FfmpegCommandBuilder;
pub use ffprobe_executor::{build_probe_invocation, parse_probe_output, probe_media};
pub use mocks::{MockCommandRunner, MockOutcome};
pub use runner::ProcessRunner;

// ============================================================================
// INVOCATION MODEL
// ============================================================================

/// A fully-specified external command: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Name used in log lines and error messages (file name of the program).
    #[must_use]
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    #[must_use]
    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as (lossy) UTF-8 strings, for logging and assertions.
    #[must_use]
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a process that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, or `None` if the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    #[must_use]
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    #[must_use]
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

// ============================================================================
// RUNNER ABSTRACTION
// ============================================================================

/// Something that can run an `Invocation` to completion.
///
/// Implementations must not feed anything to the child's stdin. A launch
/// failure is reported as `CoreError::ProcessLaunchFailure`; a non-zero exit
/// is *not* an error at this level and comes back as a `CommandOutput`.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        invocation: &Invocation,
        cancel: Option<&CancellationToken>,
    ) -> CoreResult<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(
        &self,
        invocation: &Invocation,
        cancel: Option<&CancellationToken>,
    ) -> CoreResult<CommandOutput> {
        (**self).run(invocation, cancel)
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for Box<R> {
    fn run(
        &self,
        invocation: &Invocation,
        cancel: Option<&CancellationToken>,
    ) -> CoreResult<CommandOutput> {
        (**self).run(invocation, cancel)
    }
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external binary can be started and reports its version line.
///
/// Runs `<program> -version` and returns the first line of stdout, e.g.
/// `ffmpeg version 6.1.1 Copyright (c) 2000-2023 the FFmpeg developers`.
pub fn check_dependency<R: CommandRunner>(runner: &R, program: &Path) -> CoreResult<String> {
    let mut invocation = Invocation::new(program);
    invocation.arg("-version");

    let output = runner.run(&invocation, None).inspect_err(|e| {
        log::warn!("Dependency '{}' could not be started: {}", program.display(), e);
    })?;

    if !output.success() {
        return Err(crate::error::command_failed_error(
            invocation.program_name(),
            output.exit_code,
            output.stderr_lossy(),
        ));
    }

    let version = output
        .stdout_lossy()
        .lines()
        .next()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    if version.is_empty() {
        return Err(CoreError::OutputParseFailure(format!(
            "'{} -version' printed nothing",
            program.display()
        )));
    }

    log::debug!("Found dependency {}: {}", program.display(), version);
    Ok(version)
}
