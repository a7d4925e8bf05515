// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Description of the process to launch.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What to run: program, arguments, working directory and environment.
///
/// The program is executed directly, never through a shell, and both output
/// streams are always captured regardless of what is configured here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: BTreeMap<String, String>,
    env_clear: bool,
}

impl ProcessCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            env_clear: false,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append arguments from a single string, split on whitespace.
    ///
    /// No quoting or escaping is interpreted.
    pub fn args_str(self, args: &str) -> Self {
        self.args(args.split_whitespace())
    }

    /// Set the working directory for the process.
    pub fn cwd(mut self, path: impl AsRef<Path>) -> Self {
        self.cwd = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set an environment variable for the process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    /// Start from an empty environment instead of inheriting this process's.
    pub fn env_clear(mut self) -> Self {
        self.env_clear = true;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn get_envs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.env.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn clears_env(&self) -> bool {
        self.env_clear
    }

    /// Program and arguments joined with spaces, for logs and messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

impl From<&str> for ProcessCommand {
    fn from(program: &str) -> Self {
        Self::new(program)
    }
}

impl From<String> for ProcessCommand {
    fn from(program: String) -> Self {
        Self::new(program)
    }
}

impl From<&ProcessCommand> for ProcessCommand {
    fn from(command: &ProcessCommand) -> Self {
        command.clone()
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
