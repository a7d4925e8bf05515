// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};

use clap::ValueEnum;
use rp_exec::ProcessResult;
use serde::Serialize;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// JSON shape of a completed run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub pid: Option<u32>,
    pub exit_code: i32,
    pub run_time_ms: u64,
    pub stdout: &'a [String],
    pub stderr: &'a [String],
}

impl<'a> From<&'a ProcessResult> for RunReport<'a> {
    fn from(result: &'a ProcessResult) -> Self {
        Self {
            pid: result.process().pid(),
            exit_code: result.exit_code(),
            run_time_ms: u64::try_from(result.run_time().as_millis()).unwrap_or(u64::MAX),
            stdout: result.standard_output(),
            stderr: result.standard_error(),
        }
    }
}

/// Write captured lines, one per line.
pub fn write_lines(mut out: impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Write the JSON report as a single line.
pub fn write_json(mut out: impl Write, report: &RunReport<'_>) -> anyhow::Result<()> {
    serde_json::to_writer(&mut out, report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Print a completed run in the requested format.
pub fn print_result(result: &ProcessResult, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            write_lines(io::stdout().lock(), result.standard_output())?;
            write_lines(io::stderr().lock(), result.standard_error())?;
        }
        OutputFormat::Json => write_json(io::stdout().lock(), &RunReport::from(result))?,
    }
    Ok(())
}
