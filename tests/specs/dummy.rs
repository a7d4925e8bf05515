// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fixture process itself.

use crate::prelude::*;
use assert_cmd::Command;

#[test]
fn writes_numbered_lines_and_exits_with_code() {
    Command::new(DUMMY)
        .args(["42", "0", "2", "1"])
        .assert()
        .code(42)
        .stdout("Standard output line #1\nStandard output line #2\n")
        .stderr("Standard error line #1\n");
}

#[test]
fn rejects_missing_arguments() {
    Command::new(DUMMY).args(["1", "0"]).assert().code(2);
}

#[test]
fn rejects_non_numeric_arguments() {
    Command::new(DUMMY).args(["x", "0", "1", "1"]).assert().code(2);
}

#[test]
fn runs_from_any_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    Command::new(DUMMY)
        .current_dir(dir.path())
        .args(["0", "0", "1", "0"])
        .assert()
        .success()
        .stdout("Standard output line #1\n");
}
