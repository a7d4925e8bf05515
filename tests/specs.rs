// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end specs: `rp-exec` driving the `rp-dummy` fixture process.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/cancellation.rs"]
mod cancellation;
#[path = "specs/completion.rs"]
mod completion;
#[path = "specs/dummy.rs"]
mod dummy;
#[path = "specs/volume.rs"]
mod volume;
