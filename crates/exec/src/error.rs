// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors surfaced to callers of the runner.

/// Why an invocation settled without a [`ProcessResult`](crate::ProcessResult).
///
/// Internal races (killing a process that already exited, an unreadable OS
/// start time) are absorbed and never show up here.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The OS refused to create the process.
    #[error("failed to start `{program}`: {source}")]
    LaunchFailed {
        program: String,
        source: std::io::Error,
    },

    /// The cancellation token fired before the process completed.
    #[error("process run was canceled")]
    Canceled,

    /// Waiting on the running process failed.
    #[error("failed to wait for process: {source}")]
    Wait { source: std::io::Error },

    /// Every resolver went away without settling the run (runtime shutdown).
    #[error("process run was abandoned before it settled")]
    Abandoned,
}

impl RunError {
    /// True for the cancellation outcome, including timeouts.
    pub fn is_canceled(&self) -> bool {
        matches!(self, RunError::Canceled)
    }

    /// True when the process never started.
    pub fn is_launch_failure(&self) -> bool {
        matches!(self, RunError::LaunchFailed { .. })
    }
}
