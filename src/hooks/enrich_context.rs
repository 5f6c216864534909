//! Prompt context enrichment (`context-enrich`)

use std::sync::Arc;

use async_trait::async_trait;

use super::Hook;
use crate::exec::CommandRunner;
use crate::git::GitClient;
use crate::manifest::{PackageManifest, detect_stack};
use crate::tracing::BestEffortExt;
use crate::types::{HookDecision, HookInvocation, HookKind};

/// Prefix of the feedback text
pub const CONTEXT_PREFIX: &str = "[Context] ";
/// Separator between facts
pub const FACT_SEPARATOR: &str = " | ";

/// Join gathered facts into feedback text
///
/// Missing facts are skipped; `None` when nothing was gathered.
pub fn merge_facts<I>(facts: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let facts: Vec<String> = facts.into_iter().flatten().collect();
    if facts.is_empty() {
        return None;
    }
    Some(format!("{CONTEXT_PREFIX}{}", facts.join(FACT_SEPARATOR)))
}

/// Gathers repository facts for the prompt
///
/// Each fact is collected independently; a failure only drops that fact.
#[derive(Debug, Clone)]
pub struct EnrichContextHook {
    runner: Arc<dyn CommandRunner>,
}

impl EnrichContextHook {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    async fn branch_fact(&self, git: GitClient<'_>) -> Option<String> {
        git.current_branch()
            .await
            .best_effort("current_branch")
            .flatten()
            .map(|branch| format!("Current branch: {branch}"))
    }

    async fn uncommitted_fact(&self, git: GitClient<'_>) -> Option<String> {
        git.uncommitted_file_count()
            .await
            .best_effort("uncommitted_files")
            .filter(|count| *count > 0)
            .map(|count| format!("Uncommitted files: {count}"))
    }

    async fn stack_fact(&self, invocation: &HookInvocation) -> Option<String> {
        let manifest = PackageManifest::load(invocation.cwd())
            .await
            .best_effort("detect_stack")?;
        let stack = detect_stack(&manifest);
        (!stack.is_empty()).then(|| format!("Detected stack: {}", stack.join(", ")))
    }
}

#[async_trait]
impl Hook for EnrichContextHook {
    fn kind(&self) -> HookKind {
        HookKind::ContextEnrich
    }

    fn name(&self) -> &'static str {
        "enrich-context"
    }

    async fn run(&self, invocation: &HookInvocation) -> HookDecision {
        let git = GitClient::new(self.runner.as_ref(), invocation.cwd());

        let branch = self.branch_fact(git).await;
        let uncommitted = self.uncommitted_fact(git).await;
        let stack = self.stack_fact(invocation).await;

        match merge_facts([branch, uncommitted, stack]) {
            Some(feedback) => {
                tracing::debug!(feedback = %feedback, "Context gathered");
                HookDecision::allow().with_feedback(feedback)
            }
            None => HookDecision::allow(),
        }
    }
}
