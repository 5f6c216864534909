//! External command execution with a hard timeout

use std::fmt;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use crate::types::{DEFAULT_COMMAND_TIMEOUT_MS, HookError, MAX_COMMAND_TIMEOUT_MS, Result};

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

/// Capability to run external programs
///
/// Implementations must bound the running time of every call. A non-zero
/// exit status is reported as [`HookError::CommandFailed`].
#[async_trait]
pub trait CommandRunner: Send + Sync + fmt::Debug {
    /// Run `program` with `args` in `cwd` and wait for it to finish
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;

    /// Start `program` and return without waiting for it
    ///
    /// Only a failure to start is reported. The child outlives the hook
    /// process and its output is discarded.
    async fn spawn_detached(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// Runs programs directly (no shell) with a timeout
///
/// The child is killed if the timeout elapses.
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    timeout: Duration,
}

impl SystemCommandRunner {
    /// Create a runner with the given timeout, capped at the maximum
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: timeout.min(Duration::from_millis(MAX_COMMAND_TIMEOUT_MS)),
        }
    }

    /// The per-command timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemCommandRunner {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_COMMAND_TIMEOUT_MS))
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::trace!(program, ?args, cwd = %cwd.display(), timeout_ms, "Running external command");

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(source)) => {
                return Err(HookError::CommandUnavailable {
                    program: program.to_string(),
                    source,
                });
            }
            Err(_) => return Err(HookError::command_timeout(program, timeout_ms)),
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(HookError::command_failed(
                program,
                output.status.code(),
                stderr.trim(),
            ));
        }

        Ok(CommandOutput { stdout, stderr })
    }

    async fn spawn_detached(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);

        tracing::trace!(program, ?args, cwd = %cwd.display(), "Starting detached command");

        let child = cmd
            .spawn()
            .map_err(|source| HookError::CommandUnavailable {
                program: program.to_string(),
                source,
            })?;
        tracing::debug!(program, pid = ?child.id(), "Detached command started");
        Ok(())
    }
}
