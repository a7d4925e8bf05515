// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for specs.

pub use rp_exec::{CancellationToken, LineBuffer, ProcessCommand, RunError, Runner};
pub use std::time::Duration;

/// Path to the fixture binary built alongside these specs.
pub const DUMMY: &str = env!("CARGO_BIN_EXE_rp-dummy");

/// Command for `rp-dummy <exit-code> <sleep-ms> <stdout-lines> <stderr-lines>`.
pub fn dummy(exit_code: i32, sleep_ms: u64, stdout_lines: usize, stderr_lines: usize) -> ProcessCommand {
    ProcessCommand::new(DUMMY)
        .args_str(&format!("{exit_code} {sleep_ms} {stdout_lines} {stderr_lines}"))
        .cwd(env!("CARGO_MANIFEST_DIR"))
}

/// The lines `rp-dummy` writes for `label` ("output" or "error").
pub fn expected_lines(label: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Standard {label} line #{i}")).collect()
}
