//! Shared test helpers.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use windns::{CommandOutput, CommandRunner, PowerShellCommand, Result};

/// Skip a live test when the required environment variables are missing.
#[macro_export]
macro_rules! skip_if_no_live_env {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// A [`CommandRunner`] that replays scripted outputs and records every
/// command it was asked to run.
pub struct ScriptedRunner {
    outputs: Mutex<VecDeque<CommandOutput>>,
    commands: Mutex<Vec<PowerShellCommand>>,
}

impl ScriptedRunner {
    pub fn new(outputs: impl IntoIterator<Item = CommandOutput>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into_iter().collect()),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// Token sequences of every command run so far, in order.
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .map(PowerShellCommand::build)
            .collect()
    }

    pub fn command_count(&self) -> usize {
        self.commands.lock().unwrap().len()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &PowerShellCommand) -> Result<CommandOutput> {
        self.commands.lock().unwrap().push(command.clone());
        Ok(self
            .outputs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| success("")))
    }
}

/// A successful invocation with the given stdout.
pub fn success(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        exit_code: 0,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// A failed invocation with the given exit code and stderr.
pub fn failure(exit_code: i32, stderr: &str) -> CommandOutput {
    CommandOutput {
        success: false,
        exit_code,
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}
