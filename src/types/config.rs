//! Resolved hook configuration
//!
//! Combines merged settings, the invocation environment and built-in
//! defaults into the values the hooks actually use.

use std::path::PathBuf;
use std::time::Duration;

use super::invocation::HookInvocation;
use crate::rules::DEFAULT_PROTECTED_BRANCHES;
use crate::settings::{HookSettings, PatternSpec};

/// Default timeout for external commands in milliseconds
pub const DEFAULT_COMMAND_TIMEOUT_MS: u64 = 2_000;
/// Maximum timeout for external commands in milliseconds
pub const MAX_COMMAND_TIMEOUT_MS: u64 = 10_000;
/// Environment variable overriding the command timeout
pub const TIMEOUT_ENV_VAR: &str = "CLAUDE_HOOK_TIMEOUT_MS";
/// Completion log location relative to the project directory
pub const DEFAULT_COMPLETION_LOG: &str = ".claude/task-completions.log";

/// Timeout from a raw `CLAUDE_HOOK_TIMEOUT_MS` value and a settings value
///
/// An unparsable environment value is ignored. The result is clamped to
/// 1..=[`MAX_COMMAND_TIMEOUT_MS`].
pub fn command_timeout(env_value: Option<&str>, settings_ms: Option<u64>) -> Duration {
    let millis = env_value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .or(settings_ms)
        .unwrap_or(DEFAULT_COMMAND_TIMEOUT_MS)
        .clamp(1, MAX_COMMAND_TIMEOUT_MS);
    Duration::from_millis(millis)
}

/// Which side effects the task completion hook performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionActions {
    /// Desktop notification
    pub notify_system: bool,
    /// Audible notification
    pub play_sound: bool,
    /// Completion log append
    pub log_completion: bool,
}

impl Default for CompletionActions {
    fn default() -> Self {
        Self {
            notify_system: true,
            play_sound: true,
            log_completion: true,
        }
    }
}

/// Configuration the hooks run with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Directory the hooks operate in
    pub project_dir: PathBuf,
    /// Upper bound for every external command
    pub command_timeout: Duration,
    /// Protected branch names and patterns
    pub protected_branches: Vec<String>,
    /// User rules added to the built-in dangerous command rules
    pub extra_patterns: Vec<PatternSpec>,
    /// Task completion side effects
    pub completion_actions: CompletionActions,
    /// Absolute or project-relative completion log path
    pub completion_log: PathBuf,
}

impl HookConfig {
    /// Resolve configuration for one invocation
    ///
    /// `CLAUDE_HOOK_TIMEOUT_MS` in the invocation environment overrides the
    /// settings timeout. Timeouts are capped at [`MAX_COMMAND_TIMEOUT_MS`].
    pub fn resolve(settings: &HookSettings, invocation: &HookInvocation) -> Self {
        let project_dir = invocation.cwd().to_path_buf();

        let command_timeout =
            command_timeout(invocation.env(TIMEOUT_ENV_VAR), settings.command_timeout_ms);

        let protected_branches = settings.protected_branches.clone().unwrap_or_else(|| {
            DEFAULT_PROTECTED_BRANCHES
                .iter()
                .map(|s| (*s).to_string())
                .collect()
        });

        let defaults = CompletionActions::default();
        let completion_actions = CompletionActions {
            notify_system: settings.notify_system.unwrap_or(defaults.notify_system),
            play_sound: settings.notify_sound.unwrap_or(defaults.play_sound),
            log_completion: settings.log_completion.unwrap_or(defaults.log_completion),
        };

        let completion_log = project_dir.join(
            settings
                .completion_log
                .as_deref()
                .unwrap_or(DEFAULT_COMPLETION_LOG),
        );

        Self {
            command_timeout,
            protected_branches,
            extra_patterns: settings.extra_dangerous_patterns.clone().unwrap_or_default(),
            completion_actions,
            completion_log,
            project_dir,
        }
    }
}
