//! Dangerous command validation (`pre-command`)

use std::sync::Arc;

use async_trait::async_trait;

use super::Hook;
use crate::rules::{BLOCKED_COMMAND_MESSAGE, CommandMatcher, DangerousCommandRules};
use crate::types::{HookDecision, HookInvocation, HookKind};

/// Blocks shell commands matching a dangerous pattern
#[derive(Debug, Clone)]
pub struct ValidateCommandHook {
    matcher: Arc<dyn CommandMatcher>,
}

impl ValidateCommandHook {
    pub fn new(matcher: Arc<dyn CommandMatcher>) -> Self {
        Self { matcher }
    }

    /// Hook using only the built-in rules
    pub fn builtin() -> Self {
        Self::new(Arc::new(DangerousCommandRules::builtin()))
    }

    /// Decide on a command without any I/O
    pub fn evaluate(&self, command: &str) -> HookDecision {
        match self.matcher.first_match(command) {
            Some(rule) => {
                tracing::info!(
                    rule = rule.label(),
                    pattern = rule.pattern(),
                    "Dangerous command blocked"
                );
                HookDecision::block(BLOCKED_COMMAND_MESSAGE)
            }
            None => HookDecision::allow(),
        }
    }
}

impl Default for ValidateCommandHook {
    fn default() -> Self {
        Self::builtin()
    }
}

#[async_trait]
impl Hook for ValidateCommandHook {
    fn kind(&self) -> HookKind {
        HookKind::PreCommand
    }

    fn name(&self) -> &'static str {
        "validate-command"
    }

    async fn run(&self, invocation: &HookInvocation) -> HookDecision {
        self.evaluate(invocation.command())
    }
}
