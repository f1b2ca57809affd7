// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! External process execution seam.
//!
//! Version detection and user-scope environment edits both shell out to
//! external programs; routing them through `CommandRunner` lets the core
//! logic run against a fake in tests instead of real OS processes.

use crate::error::{JdkmanError, Result};
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, when the process terminated normally.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Combined stdout and stderr. `java -version` writes its banner to
    /// stderr, so version matching always scans both streams.
    pub fn combined(&self) -> String {
        if self.stdout.is_empty() {
            self.stderr.clone()
        } else if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

pub trait CommandRunner: Send + Sync {
    /// Run a program to completion, capturing output and exit status.
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput>;
}

/// `CommandRunner` backed by `std::process::Command`.
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &Path, args: &[&str]) -> Result<CommandOutput> {
        log::trace!("Running {} {:?}", program.display(), args);

        let output = Command::new(program).args(args).output().map_err(|e| {
            JdkmanError::SystemError(format!("Failed to run {}: {e}", program.display()))
        })?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_prefers_nonempty_stream() {
        let out = CommandOutput {
            status: Some(0),
            stdout: String::new(),
            stderr: "openjdk version \"17.0.2\"".to_string(),
        };
        assert_eq!(out.combined(), "openjdk version \"17.0.2\"");

        let out = CommandOutput {
            status: Some(0),
            stdout: "a".to_string(),
            stderr: "b".to_string(),
        };
        assert_eq!(out.combined(), "a\nb");
    }

    #[test]
    #[cfg(unix)]
    fn test_system_runner_captures_output() {
        let runner = SystemCommandRunner;
        let output = runner.run(Path::new("/bin/echo"), &["hello"]).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[test]
    #[cfg(unix)]
    fn test_system_runner_reports_nonzero_status() {
        let runner = SystemCommandRunner;
        let output = runner
            .run(Path::new("/bin/sh"), &["-c", "echo oops >&2; exit 3"])
            .unwrap();
        assert!(!output.success());
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[test]
    fn test_system_runner_missing_program_is_an_error() {
        let runner = SystemCommandRunner;
        let result = runner.run(Path::new("/definitely/not/a/program"), &[]);
        assert!(matches!(result, Err(JdkmanError::SystemError(_))));
    }
}
