// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running a process to completion.
//!
//! Three things finish independently: the process exits, stdout closes,
//! stderr closes. The OS can report the exit before the last buffered lines
//! have been read, so a run only completes once all three have been seen.
//! Cancellation can settle the run first; whichever settles first wins.

use std::fmt;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, field::Empty, warn, Instrument, Span};

use crate::cancel::{self, AbortOnDrop, KillOnAbandon, ProcessSlot};
use crate::collector::LineBuffer;
use crate::command::ProcessCommand;
use crate::config::RunConfig;
use crate::error::RunError;
use crate::handle::{ExitInfo, ProcessHandle};
use crate::launcher::{self, Launched};
use crate::result::ProcessResult;
use crate::signal::{outcome, Outcome};

pub(crate) type RunOutcome = Outcome<Result<ProcessResult, RunError>>;

// ---------------------------------------------------------------------------
// Run state
// ---------------------------------------------------------------------------

/// Lifecycle of one run, recorded on its tracing span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Launching,
    Running,
    Completed,
    Canceled,
    LaunchFailed,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            RunState::NotStarted => "not_started",
            RunState::Launching => "launching",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Canceled => "canceled",
            RunState::LaunchFailed => "launch_failed",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunState::Completed | RunState::Canceled | RunState::LaunchFailed
        )
    }

    /// Terminal state for a settled run, if it reached one.
    pub fn of(result: &Result<ProcessResult, RunError>) -> Option<Self> {
        match result {
            Ok(_) => Some(RunState::Completed),
            Err(RunError::Canceled) => Some(RunState::Canceled),
            Err(RunError::LaunchFailed { .. }) => Some(RunState::LaunchFailed),
            Err(RunError::Wait { .. } | RunError::Abandoned) => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Launches processes and waits for them with their output captured.
///
/// Every entry point funnels into [`Runner::run_with_sinks`].
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RunConfig) -> Self {
        Self { config }
    }

    /// Runner configured from `RP_*` environment variables.
    pub fn from_env() -> Self {
        Self::with_config(RunConfig::from_env())
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run to completion without cancellation.
    pub async fn run(&self, command: impl Into<ProcessCommand>) -> Result<ProcessResult, RunError> {
        self.run_with_cancel(command, &CancellationToken::new()).await
    }

    /// Run until completion or until `cancel` fires.
    pub async fn run_with_cancel(
        &self,
        command: impl Into<ProcessCommand>,
        cancel: &CancellationToken,
    ) -> Result<ProcessResult, RunError> {
        self.run_with_sinks(command, LineBuffer::new(), LineBuffer::new(), cancel)
            .await
    }

    /// Run, canceling if the process has not completed within `timeout`.
    ///
    /// A timeout surfaces as [`RunError::Canceled`].
    pub async fn run_with_timeout(
        &self,
        command: impl Into<ProcessCommand>,
        timeout: Duration,
    ) -> Result<ProcessResult, RunError> {
        let cancel = CancellationToken::new();
        let _timer = {
            let cancel = cancel.clone();
            AbortOnDrop::new(tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                cancel.cancel();
            }))
        };
        self.run_with_cancel(command, &cancel).await
    }

    /// Run, appending captured lines to caller-supplied buffers.
    ///
    /// `stdout` and `stderr` fill in place while the process runs, and their
    /// final contents are also returned in the [`ProcessResult`]. On a
    /// canceled run nothing is returned and whatever was captured stays only
    /// in the buffers.
    pub async fn run_with_sinks(
        &self,
        command: impl Into<ProcessCommand>,
        stdout: LineBuffer,
        stderr: LineBuffer,
        cancel: &CancellationToken,
    ) -> Result<ProcessResult, RunError> {
        let command = command.into();
        let span = tracing::info_span!(
            "proc.run",
            program = %command.program(),
            args = ?command.get_args(),
            pid = Empty,
            exit_code = Empty,
            duration_ms = Empty,
            state = %RunState::NotStarted,
        );
        self.invoke(command, stdout, stderr, cancel)
            .instrument(span)
            .await
    }

    async fn invoke(
        &self,
        command: ProcessCommand,
        stdout: LineBuffer,
        stderr: LineBuffer,
        cancel: &CancellationToken,
    ) -> Result<ProcessResult, RunError> {
        let span = Span::current();
        let (cell, settled) = outcome();
        let cell = Arc::new(cell);
        let process: ProcessSlot = Arc::new(OnceLock::new());

        let _registration = cancel::register(cancel, Arc::clone(&cell), Arc::clone(&process));

        if cancel.is_cancelled() {
            cancel::on_cancel(&cell, None);
        } else {
            span.record("state", RunState::Launching.as_str());
            match launcher::launch(&command, stdout, stderr, &self.config) {
                Ok(launched) => {
                    let handle = Arc::clone(&launched.handle);
                    if let Some(pid) = handle.pid() {
                        span.record("pid", pid);
                    }
                    let _ = process.set(Arc::clone(&handle));
                    span.record("state", RunState::Running.as_str());
                    tokio::spawn(synchronize(launched, Arc::clone(&cell)).in_current_span());

                    // The watcher may have fired before the handle was
                    // published and found nothing to kill.
                    if cancel.is_cancelled() {
                        cancel::kill_if_running(&handle);
                    }
                }
                Err(err) => {
                    warn!(error = %err, "launch failed");
                    cell.resolve(Err(err));
                }
            }
        }
        drop(cell);

        let abandon = KillOnAbandon::new(Arc::clone(&process));
        let result = settled.wait().await.unwrap_or(Err(RunError::Abandoned));
        abandon.disarm();

        if let (Err(RunError::Canceled), Some(handle)) = (&result, process.get()) {
            // Don't report canceled while the process may still be running.
            if tokio::time::timeout(self.config.kill_grace, handle.wait_exited())
                .await
                .is_err()
            {
                warn!(pid = ?handle.pid(), "process not reaped within kill grace");
            }
        }

        if let Ok(ref done) = result {
            span.record("exit_code", done.exit_code());
            span.record("duration_ms", done.run_time().as_millis() as u64);
        }
        if let Some(state) = RunState::of(&result) {
            span.record("state", state.as_str());
        }
        result
    }
}

/// Exit watcher: owns the child, waits for it to exit (or kills it on
/// request), then waits for both streams before settling the run.
async fn synchronize(launched: Launched, cell: Arc<RunOutcome>) {
    let Launched {
        mut child,
        handle,
        stdout_closed,
        stderr_closed,
    } = launched;

    let status = tokio::select! {
        status = child.wait() => status,
        () = handle.kill_requested() => {
            if let Err(e) = child.start_kill() {
                // Exited between the has-exited check and the kill.
                debug!(error = %e, "kill after exit ignored");
            }
            child.wait().await
        }
    };
    let status = match status {
        Ok(status) => status,
        Err(source) => {
            cell.resolve(Err(RunError::Wait { source }));
            return;
        }
    };

    let exit = handle.record_exit(status);
    debug!(exit_code = exit.code, "process exited");

    // Exit alone is not enough: the readers may still hold buffered lines.
    let (stdout, stderr) = tokio::join!(stdout_closed.wait(), stderr_closed.wait());
    complete(&cell, handle, exit, stdout.unwrap_or_default(), stderr.unwrap_or_default());
}

/// Settle the run with its result, unless it already settled (canceled).
///
/// Returns whether a result was built and delivered.
fn complete(
    cell: &RunOutcome,
    handle: Arc<ProcessHandle>,
    exit: ExitInfo,
    stdout: Vec<String>,
    stderr: Vec<String>,
) -> bool {
    if cell.is_resolved() {
        debug!("run already settled, no result built");
        return false;
    }
    cell.resolve(Ok(ProcessResult::new(handle, exit, stdout, stderr)))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Run `command` to completion, configured from the environment.
pub async fn run(command: impl Into<ProcessCommand>) -> Result<ProcessResult, RunError> {
    Runner::from_env().run(command).await
}

/// Run `command` until completion or until `cancel` fires.
pub async fn run_with_cancel(
    command: impl Into<ProcessCommand>,
    cancel: &CancellationToken,
) -> Result<ProcessResult, RunError> {
    Runner::from_env().run_with_cancel(command, cancel).await
}

/// Run `command`, canceling it after `timeout`.
pub async fn run_with_timeout(
    command: impl Into<ProcessCommand>,
    timeout: Duration,
) -> Result<ProcessResult, RunError> {
    Runner::from_env().run_with_timeout(command, timeout).await
}

/// Run `command`, appending captured lines to `stdout` and `stderr` in place.
pub async fn run_with_sinks(
    command: impl Into<ProcessCommand>,
    stdout: LineBuffer,
    stderr: LineBuffer,
    cancel: &CancellationToken,
) -> Result<ProcessResult, RunError> {
    Runner::from_env()
        .run_with_sinks(command, stdout, stderr, cancel)
        .await
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
