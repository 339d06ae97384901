// NetMotive IP Switcher - Platform Adapter Operations
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Platform-specific adapter operations.
//!
//! Each supported OS gets one [`AdapterOps`] implementation that knows how to
//! list adapters, check for administrative rights and build the command
//! sequence that applies a profile:
//!
//! - [`WindowsAdapterOps`]: `netsh`
//! - [`MacAdapterOps`]: `networksetup`
//! - [`LinuxAdapterOps`]: `nmcli`
//!
//! Commands are described as [`CommandSpec`] values and executed through a
//! [`CommandRunner`], always with an argument vector and never through a shell.

mod linux;
mod macos;
mod runner;
mod windows;

#[cfg(test)]
pub(crate) mod testing;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::{AdapterInfo, Error, Profile, Result};

pub use linux::LinuxAdapterOps;
pub use macos::MacAdapterOps;
pub use runner::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};
pub use windows::WindowsAdapterOps;

/// Output fragments that mean the command was refused for lack of privileges.
static PRIVILEGE_ERROR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)requires elevation|run as administrator|access is denied|permission denied",
        r"|operation not permitted|not authorized|must be root|run this tool as root",
        r"|requires admin|insufficient privilege",
    ))
    .expect("privilege pattern is valid")
});

/// Check whether command output reports a privilege problem.
pub fn looks_like_privilege_error(text: &str) -> bool {
    PRIVILEGE_ERROR.is_match(text)
}

/// What a privilege probe said about the current process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Elevation {
    Elevated,
    NotElevated,
    /// The probe failed for an unrelated reason; the text says why.
    Unknown(String),
}

/// Operations needed to enumerate adapters and apply profiles on one OS.
pub trait AdapterOps {
    /// Short platform name used in logs and messages.
    fn platform(&self) -> &'static str;

    /// Command that lists the available adapters.
    fn list_command(&self) -> CommandSpec;

    /// Parse the stdout of [`AdapterOps::list_command`].
    fn parse_adapters(&self, stdout: &str) -> Vec<AdapterInfo>;

    /// Command whose result tells whether the process is elevated.
    ///
    /// `None` means the platform authorizes each change itself.
    fn privilege_probe(&self) -> Option<CommandSpec> {
        None
    }

    /// Interpret the output of [`AdapterOps::privilege_probe`].
    fn elevation(&self, output: &CommandOutput) -> Elevation {
        if output.success() {
            Elevation::Elevated
        } else {
            Elevation::NotElevated
        }
    }

    /// Advice shown when the process lacks privileges.
    fn privilege_hint(&self) -> &'static str;

    /// Build the ordered command sequence that applies `profile` to `adapter`.
    fn apply_commands(&self, profile: &Profile, adapter: &str) -> Result<Vec<CommandSpec>>;

    /// Report output that means failure even though the exit status was zero.
    fn unexpected_output(&self, _output: &CommandOutput) -> Option<String> {
        None
    }

    /// Run the listing command and parse the adapters it reports.
    fn list_adapters(&self, runner: &dyn CommandRunner) -> Result<Vec<AdapterInfo>> {
        let command = self.list_command();
        debug!("Listing adapters with: {}", command);

        let output = runner.run(&command).map_err(|e| {
            Error::EnumerationFailed(format!("could not run '{}': {}", command.program, e))
        })?;

        if !output.success() {
            return Err(Error::EnumerationFailed(format!(
                "'{}' exited with {}: {}",
                command,
                output.status_text(),
                output.combined().trim()
            )));
        }

        Ok(self.parse_adapters(&output.stdout))
    }
}

/// Select the adapter operations for the OS this binary runs on.
pub fn for_current_platform() -> Result<Box<dyn AdapterOps>> {
    for_os(std::env::consts::OS)
}

/// Select the adapter operations for a named OS (`std::env::consts::OS` values).
pub fn for_os(os: &str) -> Result<Box<dyn AdapterOps>> {
    match os {
        "windows" => Ok(Box::new(WindowsAdapterOps)),
        "macos" => Ok(Box::new(MacAdapterOps)),
        "linux" => Ok(Box::new(LinuxAdapterOps)),
        other => Err(Error::ActionNotSupported(format!(
            "applying profiles is not supported on '{}' (Windows, macOS and Linux are)",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testing::ScriptedRunner;

    #[test]
    fn test_privilege_error_detection() {
        assert!(looks_like_privilege_error(
            "The requested operation requires elevation (Run as administrator)."
        ));
        assert!(looks_like_privilege_error("Error: Not authorized to control networking."));
        assert!(looks_like_privilege_error("networksetup: permission denied"));
        assert!(!looks_like_privilege_error("Element not found."));
    }

    #[test]
    fn test_for_os() {
        assert_eq!(for_os("windows").unwrap().platform(), "Windows");
        assert_eq!(for_os("macos").unwrap().platform(), "macOS");
        assert_eq!(for_os("linux").unwrap().platform(), "Linux");
        assert!(matches!(for_os("freebsd"), Err(Error::ActionNotSupported(_))));
    }

    #[test]
    fn test_list_adapters_missing_tool_is_enumeration_error() {
        let runner = ScriptedRunner::new().then_spawn_error(std::io::ErrorKind::NotFound);
        let err = WindowsAdapterOps.list_adapters(&runner).unwrap_err();
        assert!(matches!(err, Error::EnumerationFailed(_)));
    }

    #[test]
    fn test_list_adapters_non_zero_exit_is_enumeration_error() {
        let runner = ScriptedRunner::new().then_fail(1, "", "networksetup: command failed");
        let err = MacAdapterOps.list_adapters(&runner).unwrap_err();
        match err {
            Error::EnumerationFailed(msg) => assert!(msg.contains("command failed")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
