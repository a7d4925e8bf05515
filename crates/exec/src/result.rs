// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of a process that ran to completion.

use std::sync::Arc;
use std::time::Duration;

use crate::handle::{ExitInfo, ProcessHandle};

/// Snapshot of a completed run.
///
/// Built only after the process exited and both output streams closed.
/// Dropping it releases the shared [`ProcessHandle`].
#[derive(Debug)]
pub struct ProcessResult {
    process: Arc<ProcessHandle>,
    run_time: Duration,
    standard_output: Vec<String>,
    standard_error: Vec<String>,
    exit_code: i32,
}

impl ProcessResult {
    pub(crate) fn new(
        process: Arc<ProcessHandle>,
        exit: ExitInfo,
        standard_output: Vec<String>,
        standard_error: Vec<String>,
    ) -> Self {
        // An exit faster than the clock resolution can read as negative; that
        // is reported as zero.
        let run_time = exit
            .exited_at
            .duration_since(process.started_at())
            .unwrap_or_default();
        Self {
            process,
            run_time,
            standard_output,
            standard_error,
            exit_code: exit.code,
        }
    }

    pub fn process(&self) -> &ProcessHandle {
        &self.process
    }

    /// Exit time minus recorded start time.
    pub fn run_time(&self) -> Duration {
        self.run_time
    }

    pub fn standard_output(&self) -> &[String] {
        &self.standard_output
    }

    pub fn standard_error(&self) -> &[String] {
        &self.standard_error
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Take ownership of the captured output as `(stdout, stderr)`.
    pub fn into_output(self) -> (Vec<String>, Vec<String>) {
        (self.standard_output, self.standard_error)
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
