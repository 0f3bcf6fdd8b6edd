//! Test doubles for the shell executor

use super::executor::{CommandExecutor, CommandOutput, ExecutableResolver, Resolution};
use githooks_core::{Error, Result};
use std::cell::RefCell;
use std::collections::HashSet;

/// Resolver that knows a fixed set of tools, installed under `/usr/bin`
pub struct StaticResolver {
    installed: HashSet<String>,
}

impl StaticResolver {
    pub fn with(tools: &[&str]) -> Self {
        Self {
            installed: tools.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ExecutableResolver for StaticResolver {
    fn resolve(&self, name: &str) -> Resolution {
        if self.installed.contains(name) {
            Resolution::found(format!("/usr/bin/{name}"))
        } else {
            Resolution::missing(name)
        }
    }
}

/// Executor recording every command instead of running it
#[derive(Default)]
pub struct RecordingExecutor {
    pub commands: RefCell<Vec<Vec<String>>>,
    failing: HashSet<String>,
    unspawnable: HashSet<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands whose last token is `token` exit with status 1
    pub fn failing_on(mut self, token: &str) -> Self {
        self.failing.insert(token.to_string());
        self
    }

    /// Commands whose program is `program` fail to start
    pub fn unspawnable(mut self, program: &str) -> Self {
        self.unspawnable.insert(program.to_string());
        self
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands.borrow().clone()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, command: &[String]) -> Result<CommandOutput> {
        self.commands.borrow_mut().push(command.to_vec());

        if command
            .first()
            .is_some_and(|program| self.unspawnable.contains(program))
        {
            return Err(Error::Spawn {
                program: command[0].clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }

        let failed = command
            .last()
            .is_some_and(|token| self.failing.contains(token));
        Ok(CommandOutput {
            status: Some(i32::from(failed)),
            stdout: String::new(),
            stderr: if failed {
                "failed".to_string()
            } else {
                String::new()
            },
        })
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
