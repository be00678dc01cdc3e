// mediatool-core/src/external/mocks.rs

// --- Mocking Infrastructure ---
//
// A scripted `CommandRunner` that never starts a process. Used by the unit
// and integration tests, and usable by embedders who want to exercise their
// own code without ffmpeg installed.

use super::{CommandOutput, CommandRunner, Invocation};
use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult, command_start_error};

use std::io;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum MockKind {
    Exit(Option<i32>),
    LaunchFailure,
}

/// What the mock runner does when an invocation matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockOutcome {
    kind: MockKind,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    create_output: bool,
}

impl MockOutcome {
    /// The process "runs" and exits with `code`.
    #[must_use]
    pub fn exit(code: i32) -> Self {
        Self {
            kind: MockKind::Exit(Some(code)),
            stdout: Vec::new(),
            stderr: Vec::new(),
            create_output: false,
        }
    }

    /// The process is terminated by a signal (no exit code).
    #[must_use]
    pub fn signalled() -> Self {
        Self {
            kind: MockKind::Exit(None),
            ..Self::exit(0)
        }
    }

    /// Spawning fails as if the binary did not exist.
    #[must_use]
    pub fn launch_failure() -> Self {
        Self {
            kind: MockKind::LaunchFailure,
            ..Self::exit(0)
        }
    }

    #[must_use]
    pub fn with_stdout(mut self, stdout: impl Into<Vec<u8>>) -> Self {
        self.stdout = stdout.into();
        self
    }

    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<Vec<u8>>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Writes a small file at the invocation's last argument (the output path)
    /// when the outcome is a zero exit.
    #[must_use]
    pub fn creating_output(mut self) -> Self {
        self.create_output = true;
        self
    }
}

#[derive(Debug)]
struct MockExpectation {
    arg_pattern: String,
    outcome: MockOutcome,
}

/// Mock implementation of `CommandRunner` supporting multiple expectations.
///
/// Queued expectations are matched in order against the argument list (any
/// argument containing the pattern) and consumed on use. If nothing queued
/// matches, the default outcome is used when one is set; otherwise the mock
/// panics, which surfaces unexpected invocations in tests.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    expectations: Mutex<Vec<MockExpectation>>,
    default_outcome: Mutex<Option<MockOutcome>>,
    received_calls: Mutex<Vec<Invocation>>,
}

impl MockCommandRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner that answers every invocation with `outcome`.
    #[must_use]
    pub fn always(outcome: MockOutcome) -> Self {
        let runner = Self::new();
        runner.set_default(outcome);
        runner
    }

    /// Queues a one-shot outcome for the next invocation with an argument containing `arg_pattern`.
    pub fn push(&self, arg_pattern: &str, outcome: MockOutcome) {
        lock(&self.expectations).push(MockExpectation {
            arg_pattern: arg_pattern.to_string(),
            outcome,
        });
    }

    pub fn set_default(&self, outcome: MockOutcome) {
        *lock(&self.default_outcome) = Some(outcome);
    }

    #[must_use]
    pub fn received_calls(&self) -> Vec<Invocation> {
        lock(&self.received_calls).clone()
    }

    /// Argument lists of every invocation received so far.
    #[must_use]
    pub fn received_args(&self) -> Vec<Vec<String>> {
        lock(&self.received_calls)
            .iter()
            .map(Invocation::args_lossy)
            .collect()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.received_calls).len()
    }

    fn next_outcome(&self, args: &[String]) -> Option<MockOutcome> {
        let mut expectations = lock(&self.expectations);
        let found = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)));

        match found {
            Some(index) => {
                let expectation = expectations.remove(index);
                log::debug!(
                    "MockCommandRunner: matched expectation with pattern '{}'",
                    expectation.arg_pattern
                );
                Some(expectation.outcome)
            }
            None => lock(&self.default_outcome).clone(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn create_dummy_output(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("MockCommandRunner failed to create parent dir {:?}: {}", parent, e);
        }
    }
    match std::fs::write(path, b"mock output") {
        Ok(()) => log::debug!("MockCommandRunner created dummy output file: {:?}", path),
        Err(e) => log::error!("MockCommandRunner failed to create {:?}: {}", path, e),
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(
        &self,
        invocation: &Invocation,
        cancel: Option<&CancellationToken>,
    ) -> CoreResult<CommandOutput> {
        lock(&self.received_calls).push(invocation.clone());

        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(CoreError::Cancelled(format!(
                "{} was not started",
                invocation.program_name()
            )));
        }

        let args = invocation.args_lossy();
        let Some(outcome) = self.next_outcome(&args) else {
            panic!("MockCommandRunner: no expectation found for command args: {args:?}");
        };

        match outcome.kind {
            MockKind::LaunchFailure => Err(command_start_error(
                invocation.program_name(),
                io::Error::new(io::ErrorKind::NotFound, "mock: binary not found"),
            )),
            MockKind::Exit(code) => {
                if outcome.create_output && code == Some(0) {
                    match invocation.get_args().last() {
                        Some(last) => create_dummy_output(Path::new(last)),
                        None => log::warn!("MockCommandRunner has no output path to create"),
                    }
                }
                Ok(CommandOutput {
                    exit_code: code,
                    stdout: outcome.stdout,
                    stderr: outcome.stderr,
                })
            }
        }
    }
}
