// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rp-exec: run a child process to completion with stdout and stderr
//! captured line by line, under optional cancellation.
//!
//! ```no_run
//! # async fn demo() -> Result<(), rp_exec::RunError> {
//! use rp_exec::ProcessCommand;
//!
//! let result = rp_exec::run(ProcessCommand::new("git").args(["status", "--short"])).await?;
//! for line in result.standard_output() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

mod cancel;
pub mod collector;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod handle;
mod launcher;
pub mod result;
pub mod runner;
pub mod signal;
mod start_time;

pub use collector::{LineBuffer, LineCollector, LineEvent, Stream};
pub use command::ProcessCommand;
pub use config::RunConfig;
pub use error::RunError;
pub use handle::{ExitInfo, ProcessHandle};
pub use result::ProcessResult;
pub use runner::{run, run_with_cancel, run_with_sinks, run_with_timeout, RunState, Runner};
pub use tokio_util::sync::CancellationToken;
