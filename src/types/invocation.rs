//! Hook invocation input
//!
//! A `HookInvocation` is built by the runner immediately before a hook runs
//! and carries everything the hook may look at: the kind, a string payload,
//! a snapshot of the relevant environment, and the directory to operate in.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable carrying the candidate shell command
pub const COMMAND_ENV_VAR: &str = "CLAUDE_COMMAND";

/// Environment variable naming the project directory
pub const PROJECT_DIR_ENV_VAR: &str = "CLAUDE_PROJECT_DIR";

/// Payload key holding the candidate shell command
pub const COMMAND_PAYLOAD_KEY: &str = "command";

/// Lifecycle point a hook is attached to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum HookKind {
    /// Before a shell command runs
    #[value(alias = "validate-command")]
    PreCommand,
    /// After the assistant finishes a task
    #[value(alias = "on-task-complete")]
    PostTask,
    /// Before a file edit is applied
    #[value(alias = "protect-branch")]
    PreEdit,
    /// When a prompt is enriched with context
    #[value(alias = "enrich-context")]
    ContextEnrich,
}

impl HookKind {
    /// All hook kinds in dispatch order
    pub const ALL: [HookKind; 4] = [
        HookKind::PreCommand,
        HookKind::PostTask,
        HookKind::PreEdit,
        HookKind::ContextEnrich,
    ];

    /// Kebab-case name as used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::PreCommand => "pre-command",
            HookKind::PostTask => "post-task",
            HookKind::PreEdit => "pre-edit",
            HookKind::ContextEnrich => "context-enrich",
        }
    }

    /// Whether the hook exists to block actions
    ///
    /// Only protective hooks may be treated as fail-closed by a host.
    pub fn is_protective(self) -> bool {
        matches!(self, HookKind::PreCommand | HookKind::PreEdit)
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether an environment variable belongs in the invocation snapshot
pub fn is_relevant_env_var(key: &str) -> bool {
    key.starts_with("CLAUDE_") || key == "HOME"
}

/// Input handed to a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInvocation {
    kind: HookKind,
    payload: BTreeMap<String, String>,
    environment: BTreeMap<String, String>,
    cwd: PathBuf,
}

impl HookInvocation {
    /// Create an invocation with an empty payload and environment
    pub fn new(kind: HookKind, cwd: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            payload: BTreeMap::new(),
            environment: BTreeMap::new(),
            cwd: cwd.into(),
        }
    }

    /// Add a payload entry
    pub fn with_payload(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Add a single environment entry
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    /// Snapshot the relevant entries of an environment
    ///
    /// Only `CLAUDE_*` variables and `HOME` are kept.
    pub fn with_environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let key = key.into();
            if is_relevant_env_var(&key) {
                self.environment.insert(key, value.into());
            }
        }
        self
    }

    /// The lifecycle point being run
    pub fn kind(&self) -> HookKind {
        self.kind
    }

    /// Directory the hook operates in
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Look up a payload entry
    pub fn payload(&self, key: &str) -> Option<&str> {
        self.payload.get(key).map(String::as_str)
    }

    /// All payload entries
    pub fn payload_entries(&self) -> &BTreeMap<String, String> {
        &self.payload
    }

    /// Look up an environment entry
    pub fn env(&self, key: &str) -> Option<&str> {
        self.environment.get(key).map(String::as_str)
    }

    /// The candidate shell command
    ///
    /// Resolution order: a non-empty `CLAUDE_COMMAND`, then the `command`
    /// payload entry, then the empty string.
    pub fn command(&self) -> &str {
        self.env(COMMAND_ENV_VAR)
            .filter(|command| !command.is_empty())
            .or_else(|| self.payload(COMMAND_PAYLOAD_KEY))
            .unwrap_or("")
    }
}
