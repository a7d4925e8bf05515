// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning the child and wiring its output streams to collectors.

use std::process::Stdio;
use std::sync::Arc;
use std::time::SystemTime;

use tokio::io::AsyncRead;
use tokio::process::Child;
use tokio::sync::mpsc;
use tracing::{debug, Instrument};

use crate::collector::{read_lines, LineBuffer, LineCollector, Stream};
use crate::command::ProcessCommand;
use crate::config::RunConfig;
use crate::error::RunError;
use crate::handle::ProcessHandle;
use crate::signal::{latch, Latch};
use crate::start_time;

/// A running child with both streams being drained.
pub(crate) struct Launched {
    pub(crate) child: Child,
    pub(crate) handle: Arc<ProcessHandle>,
    pub(crate) stdout_closed: Latch<Vec<String>>,
    pub(crate) stderr_closed: Latch<Vec<String>>,
}

/// Build the OS command: direct exec, stdin closed, both outputs piped.
pub(crate) fn build(command: &ProcessCommand) -> tokio::process::Command {
    let mut process = tokio::process::Command::new(command.program());
    process.args(command.get_args());
    if let Some(cwd) = command.get_cwd() {
        process.current_dir(cwd);
    }
    if command.clears_env() {
        process.env_clear();
    }
    process.envs(command.get_envs());

    process.stdin(Stdio::null());
    process.stdout(Stdio::piped());
    process.stderr(Stdio::piped());
    process
}

/// Start the process and begin draining stdout and stderr.
///
/// Reading starts before this returns, so a chatty child never stalls on a
/// full pipe while the caller is still setting up.
pub(crate) fn launch(
    command: &ProcessCommand,
    stdout: LineBuffer,
    stderr: LineBuffer,
    config: &RunConfig,
) -> Result<Launched, RunError> {
    let mut process = build(command);

    let before = SystemTime::now();
    let mut child = process.spawn().map_err(|source| RunError::LaunchFailed {
        program: command.program().to_string(),
        source,
    })?;
    let after = SystemTime::now();

    let pid = child.id();
    let started_at = start_time::resolve(pid.and_then(start_time::probe), before, after);
    debug!(pid = ?pid, "process spawned");

    let capacity = config.line_channel_capacity.max(1);
    let stdout_closed = collect(Stream::Stdout, child.stdout.take(), stdout, capacity);
    let stderr_closed = collect(Stream::Stderr, child.stderr.take(), stderr, capacity);

    Ok(Launched {
        child,
        handle: Arc::new(ProcessHandle::new(pid, command.program(), started_at)),
        stdout_closed,
        stderr_closed,
    })
}

/// Spawn the reader and collector tasks for one stream.
fn collect<R>(stream: Stream, pipe: Option<R>, sink: LineBuffer, capacity: usize) -> Latch<Vec<String>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (fire, closed) = latch();
    let (tx, rx) = mpsc::channel(capacity);

    tokio::spawn(LineCollector::new(stream, sink, fire).run(rx).in_current_span());
    match pipe {
        Some(pipe) => {
            tokio::spawn(read_lines(stream, pipe, tx).in_current_span());
        }
        // Not piped: the collector sees the channel close and fires at once.
        None => drop(tx),
    }
    closed
}

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
