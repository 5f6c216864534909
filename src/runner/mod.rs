//! Hook runner
//!
//! Turns one process invocation into one decision: logging setup, input
//! assembly, settings resolution and dispatch.

mod input;
mod logging;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::cli::Cli;
use crate::exec::{CommandRunner, SystemCommandRunner};
use crate::hooks::HookRegistry;
use crate::notify::Platform;
use crate::settings::SettingsManager;
use crate::types::{HookConfig, HookDecision, HookInvocation, TIMEOUT_ENV_VAR, command_timeout};

pub use input::build_invocation;

/// Run the hook selected on the command line
///
/// Logging problems are reported on stderr and do not stop the hook. Stdin is
/// read under the command timeout; a host that never closes it gets a
/// decision on empty input.
pub async fn run_with_cli(cli: &Cli) -> anyhow::Result<HookDecision> {
    if let Err(e) = logging::init_logging(cli) {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    tracing::debug!(
        version = %env!("CARGO_PKG_VERSION"),
        hook = %cli.hook,
        diagnostic = cli.is_diagnostic(),
        "Hook process started"
    );

    let stdin_text = if cli.stdin {
        let timeout = command_timeout(std::env::var(TIMEOUT_ENV_VAR).ok().as_deref(), None);
        Some(read_input(tokio::io::stdin(), timeout).await)
    } else {
        None
    };

    let process_cwd = std::env::current_dir().context("Failed to read working directory")?;
    let invocation = build_invocation(cli, stdin_text.as_deref(), std::env::vars(), &process_cwd);

    Ok(run_invocation(&invocation).await)
}

/// Run one invocation with the user's settings and this platform's notifier
pub async fn run_invocation(invocation: &HookInvocation) -> HookDecision {
    run_invocation_with(invocation, Platform::current(), dirs::home_dir().as_deref()).await
}

/// Run one invocation with an explicit platform and home directory
///
/// A `None` home directory skips the user settings layer.
pub async fn run_invocation_with(
    invocation: &HookInvocation,
    platform: Platform,
    home_dir: Option<&Path>,
) -> HookDecision {
    let settings = SettingsManager::with_home(invocation.cwd(), home_dir);
    let config = HookConfig::resolve(settings.settings(), invocation);

    tracing::debug!(
        project_dir = %config.project_dir.display(),
        timeout_ms = config.command_timeout.as_millis(),
        protected_branches = ?config.protected_branches,
        extra_patterns = config.extra_patterns.len(),
        "Hook configuration resolved"
    );

    let runner: Arc<dyn CommandRunner> = Arc::new(SystemCommandRunner::new(config.command_timeout));
    let registry = HookRegistry::with_defaults(&config, runner, platform);

    registry.dispatch(invocation).await
}

/// Read all of `reader`, giving up after `timeout`
///
/// Read failures and timeouts yield empty input.
async fn read_input<R>(mut reader: R, timeout: Duration) -> String
where
    R: AsyncRead + Unpin,
{
    let mut text = String::new();
    match tokio::time::timeout(timeout, reader.read_to_string(&mut text)).await {
        Ok(Ok(_)) => text,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Failed to read hook input from stdin, using empty input");
            String::new()
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = timeout.as_millis(),
                "Timed out reading hook input from stdin, using empty input"
            );
            String::new()
        }
    }
}
