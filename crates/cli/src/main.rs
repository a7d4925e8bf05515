// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rp: run a program, capture its output line by line, report the result.

mod cli;
mod exit_error;
mod output;

use std::io::Write;

use anyhow::Result;
use clap::Parser;
use rp_exec::{RunError, Runner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::exit_error::{ExitError, EXIT_FAILURE, EXIT_TIMED_OUT};

/// Filter variable for `rp`'s own diagnostics.
const LOG_ENV: &str = "RP_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the program and print its result. Returns the exit code for `rp`.
async fn execute(cli: Cli) -> Result<i32> {
    let runner = Runner::from_env();
    let command = cli.process_command();
    tracing::debug!(command = %command.display(), "running");

    let outcome = match cli.timeout() {
        Some(timeout) => runner.run_with_timeout(command, timeout).await,
        None => runner.run(command).await,
    };

    let result = match outcome {
        Ok(result) => result,
        Err(RunError::Canceled) => {
            let ms = cli.timeout_ms.unwrap_or_default();
            return Err(ExitError::new(EXIT_TIMED_OUT, format!("timed out after {ms}ms")).into());
        }
        Err(err) => return Err(ExitError::from(err).into()),
    };

    output::print_result(&result, cli.format)?;
    Ok(result.exit_code())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let code = match execute(cli).await {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<ExitError>() {
            Some(exit) => {
                if !exit.message.is_empty() {
                    eprintln!("rp: {}", exit.message);
                }
                exit.code
            }
            None => {
                eprintln!("rp: {err:#}");
                EXIT_FAILURE
            }
        },
    };

    let _ = std::io::stdout().flush();
    std::process::exit(code);
}
