// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reacting to external cancellation of a run.

use std::sync::{Arc, OnceLock};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, Instrument};

use crate::handle::ProcessHandle;
use crate::runner::RunOutcome;

/// Slot for the process handle; empty until the launcher has spawned.
pub(crate) type ProcessSlot = Arc<OnceLock<Arc<ProcessHandle>>>;

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
pub(crate) struct AbortOnDrop(JoinHandle<()>);

impl AbortOnDrop {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self(task)
    }
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Watch `token` for the lifetime of the returned guard.
///
/// Registered before launch so a cancellation that arrives while the process
/// is still being spawned is honored.
pub(crate) fn register(token: &CancellationToken, outcome: Arc<RunOutcome>, process: ProcessSlot) -> AbortOnDrop {
    let token = token.clone();
    let task = tokio::spawn(
        async move {
            token.cancelled().await;
            on_cancel(&outcome, process.get());
        }
        .in_current_span(),
    );
    AbortOnDrop::new(task)
}

/// Settle the run as canceled, then kill the process if it is still alive.
pub(crate) fn on_cancel(outcome: &RunOutcome, process: Option<&Arc<ProcessHandle>>) {
    if outcome.resolve(Err(crate::RunError::Canceled)) {
        debug!("run canceled");
    }
    if let Some(handle) = process {
        kill_if_running(handle);
    }
}

/// Request a kill unless the process has already exited.
///
/// The check is not atomic with the kill. The exit watcher treats a kill that
/// lands after exit as a no-op.
pub(crate) fn kill_if_running(handle: &ProcessHandle) {
    if handle.has_exited() {
        return;
    }
    debug!(pid = ?handle.pid(), "killing process");
    handle.request_kill();
}

/// Kills the process if the run future is dropped before it settles.
#[derive(Debug)]
pub(crate) struct KillOnAbandon {
    process: ProcessSlot,
    armed: bool,
}

impl KillOnAbandon {
    pub(crate) fn new(process: ProcessSlot) -> Self {
        Self { process, armed: true }
    }

    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for KillOnAbandon {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Some(handle) = self.process.get() {
            debug!("run dropped before settling");
            kill_if_running(handle);
        }
    }
}

#[cfg(test)]
#[path = "cancel_tests.rs"]
mod tests;
