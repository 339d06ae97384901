// NetMotive IP Switcher - Apply Engine
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Applies profiles to adapters.
//!
//! The engine pairs the platform [`AdapterOps`] with a [`CommandRunner`] and
//! runs the planned commands in order, stopping at the first failure. Steps
//! that already succeeded are not rolled back; they are reported in
//! [`Error::ApplyFailed`] so the caller can tell the user what changed.

use std::io::ErrorKind;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::adapter_ops::{
    self, looks_like_privilege_error, AdapterOps, CommandRunner, CommandSpec, Elevation,
    SystemCommandRunner,
};
use crate::models::validation::validate_adapter_name;
use crate::models::{AdapterInfo, Error, ExecutionResult, Profile, Result, StepResult, StepStatus};

/// Runs adapter enumeration and profile application for one platform.
pub struct ApplyEngine {
    ops: Box<dyn AdapterOps>,
    runner: Box<dyn CommandRunner>,
}

impl ApplyEngine {
    /// Create an engine from explicit operations and a runner.
    pub fn new(ops: Box<dyn AdapterOps>, runner: Box<dyn CommandRunner>) -> Self {
        Self { ops, runner }
    }

    /// Create an engine for the current OS that runs real system commands.
    ///
    /// Fails with [`Error::ActionNotSupported`] on unsupported platforms.
    pub fn for_current_platform() -> Result<Self> {
        let ops = adapter_ops::for_current_platform()?;
        info!("Using {} adapter operations", ops.platform());
        Ok(Self::new(ops, Box::new(SystemCommandRunner)))
    }

    /// Platform name of the underlying operations.
    pub fn platform(&self) -> &'static str {
        self.ops.platform()
    }

    /// List the adapters the OS reports.
    pub fn list_adapters(&self) -> Result<Vec<AdapterInfo>> {
        match self.ops.list_adapters(self.runner.as_ref()) {
            Ok(adapters) => {
                debug!("Found {} adapter(s)", adapters.len());
                Ok(adapters)
            }
            Err(e) => {
                warn!("Adapter enumeration failed: {}", e);
                Err(e)
            }
        }
    }

    /// Check that the process may change adapter settings.
    ///
    /// A probe that cannot be run, or whose result is inconclusive, is logged
    /// and treated as a pass; the configuration commands then report any
    /// refusal themselves.
    pub fn check_privileges(&self) -> Result<()> {
        let Some(probe) = self.ops.privilege_probe() else {
            return Ok(());
        };

        let output = match self.runner.run(&probe) {
            Ok(output) => output,
            Err(e) => {
                warn!("Could not run privilege check '{}': {}", probe, e);
                return Ok(());
            }
        };

        match self.ops.elevation(&output) {
            Elevation::Elevated => Ok(()),
            Elevation::NotElevated => {
                Err(Error::PrivilegeRequired(self.ops.privilege_hint().to_string()))
            }
            Elevation::Unknown(reason) => {
                warn!("Privilege check '{}' was inconclusive: {}", probe, reason);
                Ok(())
            }
        }
    }

    /// Apply `profile` to `adapter`.
    ///
    /// Validation and privilege errors are reported before any command that
    /// changes the adapter runs.
    pub fn apply(&self, profile: &Profile, adapter: &str) -> Result<ExecutionResult> {
        let adapter = validate_adapter_name(adapter)?;
        let commands = self.ops.apply_commands(profile, adapter)?;
        self.check_privileges()?;

        info!(
            "Applying profile '{}' to '{}' ({} command(s))",
            profile.name(),
            adapter,
            commands.len()
        );

        let mut result = ExecutionResult::new(profile.name(), adapter);

        for command in &commands {
            let (step, failure) = self.run_step(command);
            result.add_step(step);

            let Some(output) = failure else {
                continue;
            };

            let applied = result.applied_steps();
            error!(
                "Step '{}' failed for profile '{}': {}",
                command.description,
                profile.name(),
                output
            );

            if applied.is_empty() && looks_like_privilege_error(&output) {
                return Err(Error::PrivilegeRequired(format!(
                    "{}\n\n{}",
                    self.ops.privilege_hint(),
                    output
                )));
            }

            return Err(Error::ApplyFailed {
                step: command.command_line(),
                output,
                applied,
            });
        }

        result.finalize();
        info!("{}", result.summary());
        Ok(result)
    }

    /// Run one command, returning its step record and failure text if it failed.
    fn run_step(&self, command: &CommandSpec) -> (StepResult, Option<String>) {
        debug!("Running step '{}': {}", command.description, command);
        let started = Instant::now();
        let outcome = self.runner.run(command);
        let duration_ms = started.elapsed().as_millis() as u64;

        let (output_text, failure) = match outcome {
            Ok(output) => {
                let text = output.combined();
                let failure = if !output.success() {
                    Some(if text.is_empty() {
                        format!("'{}' exited with {}", command.program, output.status_text())
                    } else {
                        text.clone()
                    })
                } else {
                    self.ops.unexpected_output(&output).map(|_| text.clone())
                };
                (text, failure)
            }
            Err(e) => {
                let text = if e.kind() == ErrorKind::PermissionDenied {
                    format!("could not run '{}': permission denied", command.program)
                } else {
                    format!("could not run '{}': {}", command.program, e)
                };
                (text.clone(), Some(text))
            }
        };

        let step = StepResult {
            description: command.description.clone(),
            command: command.command_line(),
            status: if failure.is_some() {
                StepStatus::Error
            } else {
                StepStatus::Success
            },
            output: output_text,
            duration_ms,
        };
        (step, failure)
    }
}
