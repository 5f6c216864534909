//! Claude Code Lifecycle Hooks
//!
//! Small decision hooks invoked by Claude Code at fixed lifecycle points.
//! Each run reads one invocation, inspects the project, and prints exactly one
//! JSON decision on stdout.
//!
//! ## Hooks
//!
//! - `pre-command` (`validate-command`): blocks destructive shell commands
//! - `post-task` (`on-task-complete`): desktop notification, sound and
//!   completion log
//! - `pre-edit` (`protect-branch`): blocks edits on protected branches
//! - `context-enrich` (`enrich-context`): adds branch, working tree and stack
//!   facts to the prompt
//!
//! ## Decisions
//!
//! ```json
//! {"block":false}
//! {"block":true,"message":"Command blocked for security. ..."}
//! {"block":false,"feedback":"[Context] Current branch: main | Uncommitted files: 2"}
//! ```
//!
//! Hooks fail open: when anything goes wrong the decision is
//! `{"block":false}`.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lifecycle_hooks::{HookInvocation, HookKind, run_invocation};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let invocation = HookInvocation::new(HookKind::PreCommand, ".")
//!         .with_payload("command", "git push --force");
//!     let decision = run_invocation(&invocation).await;
//!     println!("{}", decision.to_json());
//! }
//! ```
//!
//! ## Environment Variables
//!
//! - `CLAUDE_COMMAND`: command text when no payload is given
//! - `CLAUDE_PROJECT_DIR`: project directory the hooks operate in
//! - `CLAUDE_HOOK_TIMEOUT_MS`: timeout for external commands (max 10000)
//!
//! ## Settings
//!
//! Settings files are loaded from:
//! - `~/.claude/lifecycle-hooks.json` (user settings)
//! - `.claude/lifecycle-hooks.json` (project settings)
//! - `.claude/lifecycle-hooks.local.json` (local settings, highest priority)
//!
//! ```json
//! {
//!   "protectedBranches": ["main", "release/*"],
//!   "extraDangerousPatterns": [{"pattern": "terraform\\s+destroy", "label": "terraform destroy"}],
//!   "notifySound": false,
//!   "commandTimeoutMs": 1500
//! }
//! ```

pub mod cli;
pub mod completion_log;
pub mod exec;
pub mod git;
pub mod hooks;
pub mod manifest;
pub mod notify;
pub mod rules;
pub mod runner;
pub mod settings;
pub mod tracing;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use cli::Cli;
pub use exec::{CommandRunner, SystemCommandRunner};
pub use hooks::{FailurePolicy, Hook, HookRegistry, interpret_hook_output};
pub use notify::{NotificationSink, Platform};
pub use runner::{run_invocation, run_invocation_with, run_with_cli};
pub use settings::{HookSettings, SettingsManager};
pub use types::{HookConfig, HookDecision, HookError, HookInvocation, HookKind, Result};
