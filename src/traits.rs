use async_trait::async_trait;

use crate::command::PowerShellCommand;
use crate::error::Result;

/// Captured outcome of one command invocation.
///
/// Produced by a [`CommandRunner`] per call and consumed once by the facade
/// or the result translator. Both output streams are always populated
/// (best effort on timeout/kill).
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// `true` iff the process ran to completion with exit code `0`.
    pub success: bool,
    /// Exit code of the process; `-1` if it never launched or was killed
    /// before reporting one.
    pub exit_code: i32,
    /// Decoded standard output.
    pub stdout: String,
    /// Decoded standard error.
    pub stderr: String,
}

/// Trait for executing built commands as external processes.
///
/// The production implementation is [`PowerShellRunner`](crate::PowerShellRunner);
/// tests substitute scripted runners through this seam.
///
/// # Failure Model
///
/// Process-level failures (non-zero exit, launch failure, timeout) are *not*
/// errors at this interface: they come back as a [`CommandOutput`] with
/// `success == false` and a descriptive `stderr`. `Err` is reserved for
/// runner implementations that have genuinely no output to report.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Execute the command and capture its outcome.
    async fn run(&self, command: &PowerShellCommand) -> Result<CommandOutput>;
}
