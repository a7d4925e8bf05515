// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared view of a launched process.

use std::process::ExitStatus;
use std::time::SystemTime;

use tokio::sync::{watch, Notify};

/// Exit state recorded once the process has been reaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitInfo {
    pub status: ExitStatus,
    /// Exit code. A process terminated by a signal reports `128 + signal`
    /// on Unix; -1 only when the status carries neither.
    pub code: i32,
    pub exited_at: SystemTime,
}

impl ExitInfo {
    pub(crate) fn new(status: ExitStatus, exited_at: SystemTime) -> Self {
        Self {
            status,
            code: exit_code(status),
            exited_at,
        }
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Handle to a process started by the runner.
///
/// Only the runner's exit watcher owns the OS child. Everyone else (the
/// cancellation watcher, the [`ProcessResult`](crate::ProcessResult)) shares
/// this handle, reads exit state from it, and asks for a kill through it.
#[derive(Debug)]
pub struct ProcessHandle {
    pid: Option<u32>,
    program: String,
    started_at: SystemTime,
    exit: watch::Sender<Option<ExitInfo>>,
    kill: Notify,
}

impl ProcessHandle {
    pub(crate) fn new(pid: Option<u32>, program: impl Into<String>, started_at: SystemTime) -> Self {
        Self {
            pid,
            program: program.into(),
            started_at,
            exit: watch::Sender::new(None),
            kill: Notify::new(),
        }
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Best-effort start time: OS-reported where available, otherwise the
    /// moment just before launch.
    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }

    pub fn has_exited(&self) -> bool {
        self.exit.borrow().is_some()
    }

    pub fn exit_info(&self) -> Option<ExitInfo> {
        *self.exit.borrow()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_info().map(|info| info.code)
    }

    pub fn exit_status(&self) -> Option<ExitStatus> {
        self.exit_info().map(|info| info.status)
    }

    pub fn exited_at(&self) -> Option<SystemTime> {
        self.exit_info().map(|info| info.exited_at)
    }

    /// Wait until the process has been reaped.
    pub async fn wait_exited(&self) -> ExitInfo {
        let mut rx = self.exit.subscribe();
        loop {
            if let Some(info) = *rx.borrow_and_update() {
                return info;
            }
            // The sender lives in `self`, so the channel cannot close here.
            let _ = rx.changed().await;
        }
    }

    pub(crate) fn record_exit(&self, status: ExitStatus) -> ExitInfo {
        let info = ExitInfo::new(status, SystemTime::now());
        self.exit.send_replace(Some(info));
        info
    }

    /// Ask the exit watcher to kill the process. Repeated requests collapse.
    pub(crate) fn request_kill(&self) {
        self.kill.notify_one();
    }

    pub(crate) async fn kill_requested(&self) {
        self.kill.notified().await;
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
