// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test fixture: sleep, print numbered lines to stdout and stderr, exit.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

#[derive(Parser)]
#[command(name = "rp-dummy", about = "Sleep, print numbered lines, exit with a given code")]
struct Args {
    /// Exit code to return
    #[arg(allow_negative_numbers = true)]
    exit_code: i32,
    /// Milliseconds to sleep before writing
    sleep_ms: u64,
    /// Lines to write to stdout
    stdout_lines: usize,
    /// Lines to write to stderr
    stderr_lines: usize,
}

fn write_lines(out: impl Write, label: &str, count: usize) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    for i in 1..=count {
        writeln!(out, "Standard {label} line #{i}")?;
    }
    out.flush()
}

fn main() -> ExitCode {
    let args = Args::parse();

    std::thread::sleep(Duration::from_millis(args.sleep_ms));

    if let Err(e) = write_lines(io::stdout().lock(), "output", args.stdout_lines)
        .and_then(|()| write_lines(io::stderr().lock(), "error", args.stderr_lines))
    {
        eprintln!("rp-dummy: {e}");
        return ExitCode::FAILURE;
    }

    // Exit codes are truncated to the low byte by the OS.
    ExitCode::from(args.exit_code as u8)
}
