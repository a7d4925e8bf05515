// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs that are canceled before the process exits on its own.

use crate::prelude::*;
use similar_asserts::assert_eq;
use std::time::Instant;

/// Five second process, three second cancellation.
#[tokio::test]
async fn process_times_out_run_is_canceled() {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(3_000)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let err = Runner::new()
        .run_with_cancel(dummy(123, 5_000, 5, 3), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, RunError::Canceled), "{err:?}");
    assert!(cancel.is_cancelled());
    assert!(started.elapsed() < Duration::from_millis(5_000));
}

#[tokio::test]
async fn timeout_helper_cancels_slow_process() {
    let err = rp_exec::run_with_timeout(dummy(0, 5_000, 1, 1), Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(err.is_canceled());
}

#[tokio::test]
async fn canceled_run_discards_output() {
    let stdout = LineBuffer::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = Runner::new()
        .run_with_sinks(dummy(0, 0, 10, 10), stdout.clone(), LineBuffer::new(), &cancel)
        .await
        .unwrap_err();

    assert!(err.is_canceled());
    assert!(stdout.is_empty());
}

#[tokio::test]
async fn late_cancel_does_not_change_completed_result() {
    let cancel = CancellationToken::new();
    let result = Runner::new()
        .run_with_cancel(dummy(3, 0, 1, 0), &cancel)
        .await
        .unwrap();
    cancel.cancel();
    assert_eq!(result.exit_code(), 3);
}
