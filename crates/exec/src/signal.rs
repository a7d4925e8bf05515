// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-fire completion latches and the single-resolution outcome cell.
//!
//! A run settles from several tasks at once (exit watcher, cancellation
//! watcher, launcher). [`Outcome`] makes every resolution after the first a
//! no-op, and [`latch`] carries one value from a stream collector to the exit
//! watcher.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::oneshot;

/// Create a latch that can fire exactly once.
pub fn latch<T>() -> (Fire<T>, Latch<T>) {
    let (tx, rx) = oneshot::channel();
    (Fire { tx }, Latch { rx })
}

/// Firing side of a [`latch`].
#[derive(Debug)]
pub struct Fire<T> {
    tx: oneshot::Sender<T>,
}

impl<T> Fire<T> {
    /// Fire with `value`. Consumes the sender, so a latch never fires twice.
    pub fn fire(self, value: T) {
        // Waiter may have gone away; nothing to deliver to.
        let _ = self.tx.send(value);
    }
}

/// Waiting side of a [`latch`].
#[derive(Debug)]
pub struct Latch<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Latch<T> {
    /// Wait until the latch fires.
    ///
    /// Returns `None` if the firing side was dropped without firing.
    pub async fn wait(self) -> Option<T> {
        self.rx.await.ok()
    }
}

/// Single-assignment cell: the first [`resolve`](Outcome::resolve) wins.
#[derive(Debug)]
pub struct Outcome<T> {
    resolved: AtomicBool,
    tx: Mutex<Option<oneshot::Sender<T>>>,
}

/// Receiving side of an [`Outcome`].
#[derive(Debug)]
pub struct Settled<T> {
    rx: oneshot::Receiver<T>,
}

/// Create an unresolved [`Outcome`] and the receiver that observes it.
pub fn outcome<T>() -> (Outcome<T>, Settled<T>) {
    let (tx, rx) = oneshot::channel();
    let cell = Outcome {
        resolved: AtomicBool::new(false),
        tx: Mutex::new(Some(tx)),
    };
    (cell, Settled { rx })
}

impl<T> Outcome<T> {
    /// Attempt to resolve with `value`.
    ///
    /// Returns `true` if this call settled the cell, `false` if an earlier
    /// call already did (the value is dropped).
    pub fn resolve(&self, value: T) -> bool {
        if self
            .resolved
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }
        if let Some(tx) = self.tx.lock().take() {
            let _ = tx.send(value);
        }
        true
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.load(Ordering::Acquire)
    }
}

impl<T> Settled<T> {
    /// Wait for the first resolution.
    ///
    /// Returns `None` if the cell was dropped unresolved.
    pub async fn wait(self) -> Option<T> {
        self.rx.await.ok()
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
