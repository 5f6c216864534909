//! Hook registry and dispatch

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use super::{
    EnrichContextHook, Hook, ProtectBranchHook, TaskCompleteHook, ValidateCommandHook,
};
use crate::completion_log::CompletionLog;
use crate::exec::CommandRunner;
use crate::notify::{Platform, sink_for};
use crate::rules::{DangerousCommandRules, ProtectedBranchSet};
use crate::types::{HookConfig, HookDecision, HookInvocation, HookKind};

/// One hook per lifecycle point
#[derive(Debug, Default)]
pub struct HookRegistry {
    hooks: BTreeMap<HookKind, Box<dyn Hook>>,
}

impl HookRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four reference hooks configured from `config`
    pub fn with_defaults(
        config: &HookConfig,
        runner: Arc<dyn CommandRunner>,
        platform: Platform,
    ) -> Self {
        let rules = DangerousCommandRules::builtin().with_extra(&config.extra_patterns);
        let sink = sink_for(platform, runner.clone(), config.project_dir.clone());

        let mut registry = Self::new();
        registry.register(Box::new(ValidateCommandHook::new(Arc::new(rules))));
        registry.register(Box::new(TaskCompleteHook::new(
            sink,
            CompletionLog::new(config.completion_log.clone()),
            config.completion_actions,
        )));
        registry.register(Box::new(ProtectBranchHook::new(
            runner.clone(),
            ProtectedBranchSet::new(config.protected_branches.iter().cloned()),
        )));
        registry.register(Box::new(EnrichContextHook::new(runner)));
        registry
    }

    /// Register a hook under its kind, returning the hook it replaces
    pub fn register(&mut self, hook: Box<dyn Hook>) -> Option<Box<dyn Hook>> {
        self.hooks.insert(hook.kind(), hook)
    }

    /// Hook registered for `kind`
    pub fn get(&self, kind: HookKind) -> Option<&dyn Hook> {
        self.hooks.get(&kind).map(Box::as_ref)
    }

    /// Registered kinds in dispatch order
    pub fn kinds(&self) -> impl Iterator<Item = HookKind> + '_ {
        self.hooks.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the hook for the invocation's kind
    ///
    /// An unregistered kind allows.
    pub async fn dispatch(&self, invocation: &HookInvocation) -> HookDecision {
        let span = tracing::info_span!(
            "hook_dispatch",
            invocation_id = %Uuid::new_v4(),
            kind = %invocation.kind(),
            hook = tracing::field::Empty,
            block = tracing::field::Empty,
            elapsed_us = tracing::field::Empty,
        );

        async move {
            let start_time = Instant::now();

            let Some(hook) = self.get(invocation.kind()) else {
                tracing::debug!("No hook registered for kind, allowing");
                return HookDecision::allow();
            };

            let span = tracing::Span::current();
            span.record("hook", hook.name());

            let decision = hook.run(invocation).await;
            let elapsed = start_time.elapsed();

            span.record("block", decision.is_blocked());
            span.record("elapsed_us", elapsed.as_micros());

            tracing::info!(
                hook = hook.name(),
                block = decision.is_blocked(),
                elapsed_us = elapsed.as_micros(),
                "Hook completed"
            );

            decision
        }
        .instrument(span)
        .await
    }
}
