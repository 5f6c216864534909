//! Hook decision output
//!
//! The only thing a hook writes to stdout: one JSON object with a required
//! `block` flag and optional `message` / `feedback` strings.

use serde::{Deserialize, Serialize};

/// Message used when a block is requested without an explanation
pub const DEFAULT_BLOCK_MESSAGE: &str = "Blocked by a lifecycle hook.";

/// Serialized form of the fail-open decision
pub const FAIL_OPEN_JSON: &str = r#"{"block":false}"#;

/// The structured allow/block result of a hook
///
/// A blocking decision always carries a non-empty message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookDecision {
    block: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
}

impl HookDecision {
    /// Allow the action
    pub fn allow() -> Self {
        Self::default()
    }

    /// Block the action with an explanation
    ///
    /// An empty message is replaced with [`DEFAULT_BLOCK_MESSAGE`].
    pub fn block(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            DEFAULT_BLOCK_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            block: true,
            message: Some(message),
            feedback: None,
        }
    }

    /// Attach feedback text for the ongoing context
    ///
    /// Empty feedback is dropped.
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        let feedback = feedback.into();
        self.feedback = (!feedback.is_empty()).then_some(feedback);
        self
    }

    /// Whether the host must deny the action
    pub fn is_blocked(&self) -> bool {
        self.block
    }

    /// Explanation for a block
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Informational text for the ongoing context
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Serialize to the single-line wire form
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| FAIL_OPEN_JSON.to_string())
    }

    /// Parse hook output leniently
    ///
    /// Accepts the whole output as one JSON object or, failing that, the last
    /// non-empty line. Returns `None` when nothing parses or `block` is
    /// missing or not a boolean.
    pub fn parse(output: &str) -> Option<Self> {
        let trimmed = output.trim();
        if trimmed.is_empty() {
            return None;
        }

        let raw: HookDecision = serde_json::from_str(trimmed).ok().or_else(|| {
            trimmed
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .and_then(|line| serde_json::from_str(line).ok())
        })?;

        let decision = if raw.block {
            HookDecision::block(raw.message.unwrap_or_default())
        } else {
            HookDecision::allow()
        };
        Some(match raw.feedback {
            Some(feedback) => decision.with_feedback(feedback),
            None => decision,
        })
    }
}
