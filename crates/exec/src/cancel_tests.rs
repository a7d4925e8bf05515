// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::signal::outcome;
use crate::RunError;
use std::time::{Duration, SystemTime};

fn slot_with(handle: &Arc<ProcessHandle>) -> ProcessSlot {
    let slot: ProcessSlot = Arc::new(OnceLock::new());
    let _ = slot.set(Arc::clone(handle));
    slot
}

async fn kill_was_requested(handle: &ProcessHandle) -> bool {
    tokio::time::timeout(Duration::from_millis(50), handle.kill_requested())
        .await
        .is_ok()
}

#[tokio::test]
async fn on_cancel_settles_canceled_and_requests_kill() {
    let (cell, settled) = outcome();
    let handle = Arc::new(ProcessHandle::new(Some(1), "sleep", SystemTime::now()));

    on_cancel(&cell, Some(&handle));

    assert!(matches!(settled.wait().await, Some(Err(RunError::Canceled))));
    assert!(kill_was_requested(&handle).await);
}

#[tokio::test]
async fn on_cancel_before_launch_only_settles() {
    let (cell, settled) = outcome();
    on_cancel(&cell, None);
    assert!(matches!(settled.wait().await, Some(Err(RunError::Canceled))));
}

#[tokio::test]
async fn on_cancel_after_settling_keeps_first_result() {
    let (cell, settled) = outcome();
    assert!(cell.resolve(Err(RunError::Abandoned)));

    on_cancel(&cell, None);

    assert!(matches!(settled.wait().await, Some(Err(RunError::Abandoned))));
}

#[cfg(unix)]
#[tokio::test]
async fn exited_process_is_not_killed() {
    use std::os::unix::process::ExitStatusExt;

    let handle = ProcessHandle::new(Some(1), "true", SystemTime::now());
    handle.record_exit(std::process::ExitStatus::from_raw(0));

    kill_if_running(&handle);

    assert!(!kill_was_requested(&handle).await);
}

#[tokio::test]
async fn registration_fires_on_token_cancel() {
    let (cell, settled) = outcome();
    let token = CancellationToken::new();
    let handle = Arc::new(ProcessHandle::new(Some(1), "sleep", SystemTime::now()));

    let _registration = register(&token, Arc::new(cell), slot_with(&handle));
    token.cancel();

    assert!(matches!(settled.wait().await, Some(Err(RunError::Canceled))));
    assert!(kill_was_requested(&handle).await);
}

#[tokio::test]
async fn dropped_registration_ignores_later_cancel() {
    let (cell, _settled) = outcome();
    let cell = Arc::new(cell);
    let token = CancellationToken::new();

    let registration = register(&token, Arc::clone(&cell), Arc::new(OnceLock::new()));
    drop(registration);
    tokio::task::yield_now().await;
    token.cancel();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(!cell.is_resolved());
}

#[tokio::test]
async fn abandoned_run_requests_kill() {
    let handle = Arc::new(ProcessHandle::new(Some(1), "sleep", SystemTime::now()));
    drop(KillOnAbandon::new(slot_with(&handle)));
    assert!(kill_was_requested(&handle).await);
}

#[tokio::test]
async fn disarmed_guard_does_nothing() {
    let handle = Arc::new(ProcessHandle::new(Some(1), "sleep", SystemTime::now()));
    KillOnAbandon::new(slot_with(&handle)).disarm();
    assert!(!kill_was_requested(&handle).await);
}
