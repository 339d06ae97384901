// NetMotive IP Switcher - Command Runner
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! External command description and execution.

use std::fmt;
use std::process::{Command, Output};
use std::rc::Rc;

use tracing::trace;

/// An external command: program, argument vector and a short description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Human-readable step description, e.g. "Set DNS servers".
    pub description: String,
    /// Program to run.
    pub program: String,
    /// Arguments, passed as-is without shell interpretation.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments.
    pub fn new(description: impl Into<String>, program: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Command line for display, quoting arguments that contain whitespace.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_for_display)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

fn quote_for_display(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Check if the command exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr, each trimmed, skipping empty streams.
    pub fn combined(&self) -> String {
        [self.stdout.trim(), self.stderr.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Exit status for messages, e.g. `exit code 1`.
    pub fn status_text(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "termination by signal".to_string(),
        }
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Executes commands and captures their output.
pub trait CommandRunner {
    /// Run a command to completion.
    ///
    /// An `Err` means the process could not be started at all.
    fn run(&self, command: &CommandSpec) -> std::io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for Rc<R> {
    fn run(&self, command: &CommandSpec) -> std::io::Result<CommandOutput> {
        (**self).run(command)
    }
}

/// Runs commands on the local system with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &CommandSpec) -> std::io::Result<CommandOutput> {
        trace!("Running: {}", command);
        let output = Command::new(&command.program).args(&command.args).output()?;
        Ok(output.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_quotes_spaces() {
        let cmd = CommandSpec::new("Set static address", "netsh")
            .args(["interface", "ipv4", "set", "address"])
            .arg("Wi-Fi 2")
            .arg("static");
        assert_eq!(
            cmd.command_line(),
            "netsh interface ipv4 set address \"Wi-Fi 2\" static"
        );
        assert_eq!(cmd.to_string(), cmd.command_line());
    }

    #[test]
    fn test_combined_output() {
        let output = CommandOutput {
            exit_code: Some(1),
            stdout: "  \n".into(),
            stderr: "Element not found.\r\n".into(),
        };
        assert!(!output.success());
        assert_eq!(output.combined(), "Element not found.");
        assert_eq!(output.status_text(), "exit code 1");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_output() {
        let cmd = CommandSpec::new("echo", "echo").arg("hello world");
        let output = SystemCommandRunner.run(&cmd).unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello world");
    }

    #[test]
    fn test_system_runner_missing_program() {
        let cmd = CommandSpec::new("missing", "ip-switcher-no-such-program");
        assert!(SystemCommandRunner.run(&cmd).is_err());
    }
}
