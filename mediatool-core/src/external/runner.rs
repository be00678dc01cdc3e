//! `CommandRunner` backed by `std::process`.
//!
//! The child gets a null stdin so ffmpeg can never block on an interactive
//! prompt. stdout and stderr are drained on background threads while the
//! calling thread polls the child, which lets a timeout or a cancellation
//! token kill it mid-run. The same limits apply while collecting output, since
//! a grandchild can keep the pipes open after the child itself has exited.

use super::{CommandOutput, CommandRunner, Invocation};
use crate::cancellation::CancellationToken;
use crate::error::{CoreError, CoreResult, command_start_error, command_wait_error};

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs invocations as real child processes.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
    poll_interval: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner {
    /// A runner with no timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Kills the child and fails with `CoreError::TimedOut` once `timeout` elapses.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// The error to stop with, if the token fired or the deadline passed.
    fn interruption(
        &self,
        program: &str,
        start: Instant,
        cancel: Option<&CancellationToken>,
    ) -> Option<CoreError> {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Some(CoreError::Cancelled(format!("{program} was terminated")));
        }
        match self.timeout {
            Some(timeout) if start.elapsed() >= timeout => Some(CoreError::TimedOut {
                program: program.to_string(),
                timeout,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

fn drain<R: Read + Send + 'static>(source: Option<R>, pipe: Pipe, tx: Sender<(Pipe, Vec<u8>)>) {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut source) = source {
            if let Err(e) = source.read_to_end(&mut buf) {
                log::debug!("Error reading child {:?}: {}", pipe, e);
            }
        }
        // The receiver is gone when the run was abandoned.
        let _ = tx.send((pipe, buf));
    });
}

fn kill_and_reap(child: &mut Child, program: &str) {
    if let Err(e) = child.kill() {
        log::debug!("Failed to kill {}: {}", program, e);
    }
    let _ = child.wait();
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        invocation: &Invocation,
        cancel: Option<&CancellationToken>,
    ) -> CoreResult<CommandOutput> {
        let program = invocation.program_name();
        log::debug!("Running command: {}", invocation);

        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(CoreError::Cancelled(format!("{program} was not started")));
        }

        let mut child = Command::new(invocation.program())
            .args(invocation.get_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                log::debug!("Failed to spawn {}: {}", program, e);
                command_start_error(program.clone(), e)
            })?;

        let (tx, rx) = mpsc::channel();
        drain(child.stdout.take(), Pipe::Stdout, tx.clone());
        drain(child.stderr.take(), Pipe::Stderr, tx);

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    kill_and_reap(&mut child, &program);
                    return Err(command_wait_error(program, e));
                }
            }

            if let Some(err) = self.interruption(&program, start, cancel) {
                log::warn!("Stopping {} (pid {}): {}", program, child.id(), err);
                kill_and_reap(&mut child, &program);
                return Err(err);
            }

            thread::sleep(self.poll_interval);
        };

        let mut stdout = None;
        let mut stderr = None;
        while stdout.is_none() || stderr.is_none() {
            match rx.recv_timeout(self.poll_interval) {
                Ok((Pipe::Stdout, buf)) => stdout = Some(buf),
                Ok((Pipe::Stderr, buf)) => stderr = Some(buf),
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(err) = self.interruption(&program, start, cancel) {
                        log::warn!(
                            "{} exited but its output pipes are still open: {}",
                            program,
                            err
                        );
                        return Err(err);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        let stdout = stdout.unwrap_or_default();
        let stderr = stderr.unwrap_or_default();

        log::debug!(
            "{} finished in {:.2}s with status {}",
            program,
            start.elapsed().as_secs_f64(),
            status
        );

        Ok(CommandOutput {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    }
}
