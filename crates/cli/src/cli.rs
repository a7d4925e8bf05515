// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use rp_exec::ProcessCommand;

use crate::output::OutputFormat;

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

#[derive(Debug, Parser)]
#[command(
    name = "rp",
    version,
    about = "Run a process, capture its output line by line, report the result"
)]
pub struct Cli {
    /// Cancel the process if it has not exited after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Working directory for the process
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Extra environment variable for the process (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Program to run, followed by its arguments
    #[arg(last = true, required = true, num_args = 1.., value_name = "PROGRAM")]
    pub command: Vec<String>,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Build the process command described by these arguments.
    pub fn process_command(&self) -> ProcessCommand {
        let (program, args) = match self.command.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => ("", &[][..]),
        };
        let mut command = ProcessCommand::new(program).args(args).envs(self.env.iter().cloned());
        if let Some(cwd) = &self.cwd {
            command = command.cwd(cwd);
        }
        command
    }
}

/// Parse a `KEY=VALUE` pair. The value may itself contain `=`.
pub fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, _)) if key.is_empty() => Err(format!("missing variable name in `{s}`")),
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}
