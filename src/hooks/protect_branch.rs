//! Protected branch guard (`pre-edit`)

use std::sync::Arc;

use async_trait::async_trait;

use super::Hook;
use crate::exec::CommandRunner;
use crate::git::GitClient;
use crate::rules::ProtectedBranchSet;
use crate::tracing::BestEffortExt;
use crate::types::{HookDecision, HookInvocation, HookKind};

/// Message shown when an edit on `branch` is refused
pub fn protected_branch_message(branch: &str) -> String {
    format!(
        "Protected branch: Cannot edit directly on '{branch}'. Create a new branch first with: git checkout -b feature/my-change"
    )
}

/// Blocks edits while a protected branch is checked out
///
/// Anything that prevents reading the branch (no repository, no git, a
/// timeout, a detached HEAD) allows the edit.
#[derive(Debug, Clone)]
pub struct ProtectBranchHook {
    runner: Arc<dyn CommandRunner>,
    protected: ProtectedBranchSet,
}

impl ProtectBranchHook {
    pub fn new(runner: Arc<dyn CommandRunner>, protected: ProtectedBranchSet) -> Self {
        Self { runner, protected }
    }
}

#[async_trait]
impl Hook for ProtectBranchHook {
    fn kind(&self) -> HookKind {
        HookKind::PreEdit
    }

    fn name(&self) -> &'static str {
        "protect-branch"
    }

    async fn run(&self, invocation: &HookInvocation) -> HookDecision {
        let git = GitClient::new(self.runner.as_ref(), invocation.cwd());

        let Some(branch) = git.current_branch().await.best_effort("current_branch").flatten()
        else {
            return HookDecision::allow();
        };

        if self.protected.is_protected(&branch) {
            tracing::info!(branch = %branch, "Edit on protected branch blocked");
            HookDecision::block(protected_branch_message(&branch))
        } else {
            tracing::debug!(branch = %branch, "Branch is not protected");
            HookDecision::allow()
        }
    }
}
