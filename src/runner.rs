//! PowerShell command runner.
//!
//! Executes a built [`PowerShellCommand`] as a child process of
//! `powershell.exe`, captures both output streams, and enforces a bounded
//! wait. Process-level failures never cross this interface as `Err`: they
//! are folded into a [`CommandOutput`] with `success == false` so the facade
//! can decide how to surface them.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::command::PowerShellCommand;
use crate::error::Result;
use crate::traits::{CommandOutput, CommandRunner};
use crate::utils::log::truncate_for_log;

/// Default `powershell.exe` installation path on the target platform.
pub const DEFAULT_POWERSHELL_PATH: &str =
    r"C:\Windows\syswow64\WindowsPowerShell\v1.0\powershell.exe";

/// How long a single invocation may run before it is killed.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Executes [`PowerShellCommand`]s through `powershell.exe`.
///
/// The interpreter path defaults to [`DEFAULT_POWERSHELL_PATH`] and is
/// injected at construction; it is never mutated afterwards.
pub struct PowerShellRunner {
    shell_path: PathBuf,
    timeout: Duration,
}

impl PowerShellRunner {
    /// Create a runner using the default interpreter path and timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_shell_path(DEFAULT_POWERSHELL_PATH)
    }

    /// Create a runner using a specific interpreter path.
    #[must_use]
    pub fn with_shell_path(shell_path: impl Into<PathBuf>) -> Self {
        Self {
            shell_path: shell_path.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the invocation timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PowerShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a pipe to completion, best effort. A read error yields whatever was
/// collected before it.
async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf).await;
    }
    buf
}

#[async_trait]
impl CommandRunner for PowerShellRunner {
    async fn run(&self, command: &PowerShellCommand) -> Result<CommandOutput> {
        let tokens = command.build();
        log::debug!(
            "Running: [{} {}]",
            self.shell_path.display(),
            tokens.join(" ")
        );

        let mut child = match Command::new(&self.shell_path)
            .args(&tokens)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                log::error!("Failed to launch {}: {e}", self.shell_path.display());
                return Ok(CommandOutput {
                    success: false,
                    exit_code: -1,
                    stdout: String::new(),
                    stderr: format!("failed to launch {}: {e}", self.shell_path.display()),
                });
            }
        };

        // Drain both pipes concurrently so the child cannot block on a full
        // pipe buffer while we wait on it.
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let stdout_task = tokio::spawn(drain(stdout_pipe));
        let stderr_task = tokio::spawn(drain(stderr_pipe));

        let (status, timed_out) = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(Ok(status)) => (Some(status), false),
            Ok(Err(e)) => {
                log::error!("Failed to wait on {}: {e}", command.cmdlet());
                (None, false)
            }
            Err(_) => {
                log::warn!(
                    "Command '{}' exceeded {:?}, killing process",
                    command.cmdlet(),
                    self.timeout
                );
                let _ = child.start_kill();
                (child.wait().await.ok(), true)
            }
        };

        // Killing the child closes its pipes, so these complete even on
        // timeout and carry whatever partial output was produced.
        let stdout_bytes = stdout_task.await.unwrap_or_default();
        let stderr_bytes = stderr_task.await.unwrap_or_default();

        // Replacement characters instead of decode failures.
        let stdout = String::from_utf8_lossy(&stdout_bytes).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_bytes).into_owned();

        log::debug!(
            "Returned: out:[{}], err:[{}]",
            truncate_for_log(&stdout),
            truncate_for_log(&stderr)
        );

        let exit_code = status.and_then(|s| s.code()).unwrap_or(-1);
        let success = !timed_out && status.is_some_and(|s| s.success());

        Ok(CommandOutput {
            success,
            exit_code,
            stdout,
            stderr,
        })
    }
}
