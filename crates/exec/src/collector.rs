// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-by-line capture of a child's output streams.
//!
//! Each stream gets a reader task that drains the pipe and a collector task
//! that owns the append side of a [`LineBuffer`]. They talk over a bounded
//! channel of [`LineEvent`]s, so only one task ever appends to a buffer.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::signal::Fire;

/// Which output stream a collector is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    pub fn as_str(self) -> &'static str {
        match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message from a stream reader to its collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    Line(String),
    Closed,
}

/// Shared, append-only sequence of captured lines.
///
/// Clones share the same storage, so a caller can hand one to the runner and
/// watch lines arrive while the process runs.
#[derive(Debug, Clone, Default)]
pub struct LineBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, line: String) {
        self.lines.lock().push(line);
    }

    /// Copy of the lines captured so far.
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl From<Vec<String>> for LineBuffer {
    fn from(lines: Vec<String>) -> Self {
        Self {
            lines: Arc::new(Mutex::new(lines)),
        }
    }
}

/// Appends lines for one stream until end-of-stream, then fires its latch
/// with the frozen sequence.
#[derive(Debug)]
pub struct LineCollector {
    stream: Stream,
    buffer: LineBuffer,
    closed: Option<Fire<Vec<String>>>,
}

impl LineCollector {
    pub fn new(stream: Stream, buffer: LineBuffer, closed: Fire<Vec<String>>) -> Self {
        Self {
            stream,
            buffer,
            closed: Some(closed),
        }
    }

    /// Apply one event. Returns `false` once the stream is closed; later
    /// events are ignored.
    pub fn accept(&mut self, event: LineEvent) -> bool {
        if self.closed.is_none() {
            return false;
        }
        match event {
            LineEvent::Line(line) => {
                self.buffer.push(line);
                true
            }
            LineEvent::Closed => {
                self.close();
                false
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_none()
    }

    fn close(&mut self) {
        if let Some(fire) = self.closed.take() {
            let lines = self.buffer.snapshot();
            debug!(stream = %self.stream, lines = lines.len(), "stream closed");
            fire.fire(lines);
        }
    }

    /// Drain `events` until the stream closes.
    ///
    /// A reader that disappears without sending [`LineEvent::Closed`] still
    /// closes the stream.
    pub async fn run(mut self, mut events: mpsc::Receiver<LineEvent>) {
        while let Some(event) = events.recv().await {
            if !self.accept(event) {
                break;
            }
        }
        self.close();
    }
}

/// Read `pipe` line by line, forwarding each line to the collector.
///
/// A line ends at `\n`, `\r`, or `\r\n`. Lines are decoded lossily, and a
/// final unterminated fragment counts as a line. A read error ends the
/// stream.
pub async fn read_lines<R>(stream: Stream, pipe: R, events: mpsc::Sender<LineEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(pipe);
    let mut splitter = LineSplitter::default();
    let mut lines = Vec::new();
    loop {
        let consumed = match reader.fill_buf().await {
            Ok([]) => break,
            Ok(chunk) => {
                splitter.push(chunk, &mut lines);
                chunk.len()
            }
            Err(e) => {
                warn!(stream = %stream, error = %e, "read failed, closing stream");
                break;
            }
        };
        reader.consume(consumed);

        for line in lines.drain(..) {
            if events.send(LineEvent::Line(line)).await.is_err() {
                // Collector is gone; nobody to deliver to.
                return;
            }
        }
    }
    if let Some(tail) = splitter.finish() {
        if events.send(LineEvent::Line(tail)).await.is_err() {
            return;
        }
    }
    let _ = events.send(LineEvent::Closed).await;
}

/// Incremental splitter over raw output chunks.
///
/// Carries a partial line and a pending `\r` between chunks, so a `\r\n`
/// split across two reads still ends exactly one line.
#[derive(Debug, Default)]
pub(crate) struct LineSplitter {
    partial: Vec<u8>,
    after_cr: bool,
}

impl LineSplitter {
    /// Split `chunk`, appending every completed line to `lines`.
    pub(crate) fn push(&mut self, mut chunk: &[u8], lines: &mut Vec<String>) {
        if self.after_cr {
            self.after_cr = false;
            if let Some(rest) = chunk.strip_prefix(b"\n") {
                chunk = rest;
            }
        }
        while let Some(end) = chunk.iter().position(|&b| b == b'\n' || b == b'\r') {
            self.partial.extend_from_slice(&chunk[..end]);
            lines.push(decode_line(&self.partial));
            self.partial.clear();

            let mut next = end + 1;
            if chunk[end] == b'\r' {
                match chunk.get(next) {
                    Some(b'\n') => next += 1,
                    Some(_) => {}
                    None => self.after_cr = true,
                }
            }
            chunk = &chunk[next..];
        }
        self.partial.extend_from_slice(chunk);
    }

    /// The unterminated fragment left at end-of-stream, if any.
    pub(crate) fn finish(&mut self) -> Option<String> {
        if self.partial.is_empty() {
            return None;
        }
        let tail = decode_line(&self.partial);
        self.partial.clear();
        Some(tail)
    }
}

/// Decode one line's bytes as UTF-8, replacing invalid bytes.
pub(crate) fn decode_line(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
