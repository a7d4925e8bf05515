// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the runner.

use std::time::Duration;

/// Bounded line channel capacity per stream (`RP_LINE_CHANNEL_CAPACITY`).
pub fn line_channel_capacity() -> Option<usize> {
    std::env::var("RP_LINE_CHANNEL_CAPACITY")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
}

/// How long a canceled run waits for the killed process to be reaped
/// (`RP_KILL_GRACE_MS`).
pub fn kill_grace() -> Option<Duration> {
    std::env::var("RP_KILL_GRACE_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}
