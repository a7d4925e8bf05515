// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs that complete normally.

use crate::prelude::*;
use similar_asserts::assert_eq;

/// Exit 123 after a second, five stdout lines and three stderr lines.
#[tokio::test]
async fn process_runs_normally_returns_expected_results() {
    const SLEEP_MS: u64 = 1_000;

    let result = Runner::new().run(dummy(123, SLEEP_MS, 5, 3)).await.unwrap();

    assert!(result.process().has_exited());
    assert_eq!(result.standard_output(), expected_lines("output", 5).as_slice());
    assert_eq!(result.standard_error(), expected_lines("error", 3).as_slice());
    assert_eq!(result.exit_code(), 123);
    assert_eq!(result.process().exit_code(), Some(123));
    assert!(
        result.run_time() >= Duration::from_millis(SLEEP_MS),
        "run time {:?} shorter than sleep",
        result.run_time()
    );
}

#[tokio::test]
async fn immediate_exit_reports_exact_lines() {
    let result = Runner::new().run(dummy(123, 0, 5, 3)).await.unwrap();

    assert_eq!(result.exit_code(), 123);
    assert_eq!(
        result.standard_output(),
        [
            "Standard output line #1",
            "Standard output line #2",
            "Standard output line #3",
            "Standard output line #4",
            "Standard output line #5",
        ]
    );
    assert_eq!(
        result.standard_error(),
        [
            "Standard error line #1",
            "Standard error line #2",
            "Standard error line #3",
        ]
    );
}

#[tokio::test]
async fn zero_lines_and_zero_exit() {
    let result = rp_exec::run(dummy(0, 0, 0, 0)).await.unwrap();
    assert!(result.success());
    assert!(result.standard_output().is_empty());
    assert!(result.standard_error().is_empty());
}

#[tokio::test]
async fn caller_buffers_receive_lines_in_place() {
    let stdout = LineBuffer::new();
    let stderr = LineBuffer::new();

    let result = rp_exec::run_with_sinks(
        dummy(7, 0, 4, 2),
        stdout.clone(),
        stderr.clone(),
        &CancellationToken::new(),
    )
    .await
    .unwrap();

    assert_eq!(stdout.snapshot(), expected_lines("output", 4));
    assert_eq!(stderr.snapshot(), expected_lines("error", 2));
    assert_eq!(result.standard_output(), stdout.snapshot().as_slice());
    assert_eq!(result.exit_code(), 7);
}

#[tokio::test]
async fn missing_program_fails_to_launch() {
    let err = Runner::new()
        .run(ProcessCommand::new(format!("{DUMMY}-missing")))
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::LaunchFailed { .. }), "{err:?}");
}
