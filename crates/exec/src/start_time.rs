// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort OS-reported process start time.
//!
//! On Linux the start time comes from `/proc/<pid>/stat`. Anywhere the
//! probe fails, the launcher falls back to the timestamp taken just before
//! spawning.

use std::time::SystemTime;

use tracing::debug;

/// Pick the start time to record for a freshly spawned process.
///
/// A probed time is kept within `[before, after]`: the process cannot have
/// started before the spawn call or after it returned.
pub(crate) fn resolve(probed: Option<SystemTime>, before: SystemTime, after: SystemTime) -> SystemTime {
    match probed {
        Some(t) if t < before => before,
        Some(t) if t > after && after >= before => after,
        Some(t) => t,
        None => {
            debug!("process start time unavailable, using pre-launch timestamp");
            before
        }
    }
}

/// Ask the OS when `pid` started.
#[cfg(target_os = "linux")]
pub(crate) fn probe(pid: u32) -> Option<SystemTime> {
    use nix::time::{clock_gettime, ClockId};
    use nix::unistd::{sysconf, SysconfVar};
    use std::time::Duration;

    let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
    let start_ticks = parse_start_ticks(&stat)?;
    let ticks_per_sec = u64::try_from(sysconf(SysconfVar::CLK_TCK).ok()??).ok()?;
    if ticks_per_sec == 0 {
        return None;
    }

    // `starttime` counts clock ticks since boot on the boottime clock.
    let now = SystemTime::now();
    let uptime = clock_gettime(ClockId::CLOCK_BOOTTIME).ok()?;
    let uptime = Duration::new(
        u64::try_from(uptime.tv_sec()).ok()?,
        u32::try_from(uptime.tv_nsec()).ok()?,
    );
    let since_boot = Duration::from_secs(start_ticks / ticks_per_sec)
        + Duration::from_nanos((start_ticks % ticks_per_sec) * 1_000_000_000 / ticks_per_sec);

    now.checked_sub(uptime.checked_sub(since_boot)?)
}

#[cfg(not(target_os = "linux"))]
pub(crate) fn probe(_pid: u32) -> Option<SystemTime> {
    None
}

/// Extract field 22 (`starttime`) from a `/proc/<pid>/stat` line.
///
/// Field 2 is the parenthesised command name, which may itself contain
/// spaces and parentheses, so fields are counted from the last `)`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub(crate) fn parse_start_ticks(stat: &str) -> Option<u64> {
    let rest = &stat[stat.rfind(')')? + 1..];
    rest.split_whitespace().nth(19)?.parse().ok()
}

#[cfg(test)]
#[path = "start_time_tests.rs"]
mod tests;
