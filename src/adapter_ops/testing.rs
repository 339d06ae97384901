// NetMotive IP Switcher - Scripted Command Runner
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! A [`CommandRunner`] that replays canned results and records every call.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use super::{CommandOutput, CommandRunner, CommandSpec};

#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    responses: RefCell<VecDeque<io::Result<CommandOutput>>>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a successful run with the given stdout.
    pub(crate) fn then_ok(self, stdout: &str) -> Self {
        self.push(Ok(CommandOutput {
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        }))
    }

    /// Queue a run that exits with `code`.
    pub(crate) fn then_fail(self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.push(Ok(CommandOutput {
            exit_code: Some(code),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }))
    }

    /// Queue a run whose process cannot be started.
    pub(crate) fn then_spawn_error(self, kind: io::ErrorKind) -> Self {
        self.push(Err(io::Error::new(kind, "spawn failed")))
    }

    fn push(self, response: io::Result<CommandOutput>) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    /// Commands run so far, in order.
    pub(crate) fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandSpec) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(command.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for '{}'", command))
    }
}
