// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error carrying the exit code `rp` should terminate with.
//!
//! `execute` returns `ExitError` for outcomes with a fixed exit code
//! (launch failure, timeout) and `main()` turns it into the process status.

use std::fmt;

use rp_exec::RunError;

/// Exit code when the program could not be started.
pub const EXIT_LAUNCH_FAILED: i32 = 127;
/// Exit code when the run was canceled by `--timeout-ms`.
pub const EXIT_TIMED_OUT: i32 = 124;
/// Exit code for any other failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl From<RunError> for ExitError {
    fn from(err: RunError) -> Self {
        let code = match &err {
            RunError::LaunchFailed { .. } => EXIT_LAUNCH_FAILED,
            RunError::Canceled => EXIT_TIMED_OUT,
            RunError::Wait { .. } | RunError::Abandoned => EXIT_FAILURE,
        };
        Self::new(code, err.to_string())
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}
