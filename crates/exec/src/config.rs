// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner configuration.

use std::time::Duration;

use crate::env;

pub const DEFAULT_LINE_CHANNEL_CAPACITY: usize = 1024;
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_secs(5);

/// Tunables shared by every run of a [`Runner`](crate::Runner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Lines buffered between a stream reader and its collector.
    pub line_channel_capacity: usize,
    /// Upper bound on waiting for a killed process to be reaped before a
    /// canceled run returns.
    pub kill_grace: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            line_channel_capacity: DEFAULT_LINE_CHANNEL_CAPACITY,
            kill_grace: DEFAULT_KILL_GRACE,
        }
    }
}

impl RunConfig {
    /// Defaults overridden by `RP_LINE_CHANNEL_CAPACITY` and `RP_KILL_GRACE_MS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            line_channel_capacity: env::line_channel_capacity()
                .unwrap_or(defaults.line_channel_capacity),
            kill_grace: env::kill_grace().unwrap_or(defaults.kill_grace),
        }
    }

    pub fn line_channel_capacity(mut self, capacity: usize) -> Self {
        self.line_channel_capacity = capacity.max(1);
        self
    }

    pub fn kill_grace(mut self, grace: Duration) -> Self {
        self.kill_grace = grace;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
