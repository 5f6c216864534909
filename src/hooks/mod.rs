//! Lifecycle hook implementations
//!
//! This module provides the four reference hooks and the dispatch registry:
//! - `ValidateCommandHook`: blocks destructive shell commands (`pre-command`)
//! - `TaskCompleteHook`: notifies and logs when a task finishes (`post-task`)
//! - `ProtectBranchHook`: blocks edits on protected branches (`pre-edit`)
//! - `EnrichContextHook`: adds repository facts to the prompt (`context-enrich`)
//!
//! Hooks are infallible at the type level. Every internal failure is logged
//! and mapped to a decision, almost always "allow".

mod enrich_context;
mod host;
mod protect_branch;
mod registry;
mod task_complete;
mod validate_command;

use std::fmt;

use async_trait::async_trait;

use crate::types::{HookDecision, HookInvocation, HookKind};

pub use enrich_context::{CONTEXT_PREFIX, EnrichContextHook, FACT_SEPARATOR, merge_facts};
pub use host::{FailurePolicy, interpret_hook_output};
pub use protect_branch::{ProtectBranchHook, protected_branch_message};
pub use registry::HookRegistry;
pub use task_complete::{NOTIFICATION_MESSAGE, NOTIFICATION_TITLE, TaskCompleteHook};
pub use validate_command::ValidateCommandHook;

/// A decision hook bound to one lifecycle point
#[async_trait]
pub trait Hook: Send + Sync + fmt::Debug {
    /// Lifecycle point this hook handles
    fn kind(&self) -> HookKind;

    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Inspect the invocation and decide
    async fn run(&self, invocation: &HookInvocation) -> HookDecision;
}
