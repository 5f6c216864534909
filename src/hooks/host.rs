//! Host-side interpretation of hook output

use crate::types::{DEFAULT_BLOCK_MESSAGE, HookDecision, HookKind};

/// What a host does when a hook produces no usable decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Allow the action
    #[default]
    FailOpen,
    /// Block the action, for protective hook kinds only
    FailClosed,
}

/// Turn raw hook output into a decision
///
/// Output that is missing, unparsable, or produced by a failing process is a
/// hook failure. Failures allow, unless `policy` is
/// [`FailurePolicy::FailClosed`] and `kind` is protective.
pub fn interpret_hook_output(
    kind: HookKind,
    stdout: Option<&str>,
    exited_successfully: bool,
    policy: FailurePolicy,
) -> HookDecision {
    let parsed = if exited_successfully {
        stdout.and_then(HookDecision::parse)
    } else {
        None
    };

    if let Some(decision) = parsed {
        return decision;
    }

    tracing::warn!(
        kind = %kind,
        exited_successfully,
        has_output = stdout.is_some_and(|s| !s.trim().is_empty()),
        policy = ?policy,
        "Hook produced no usable decision"
    );

    match policy {
        FailurePolicy::FailClosed if kind.is_protective() => {
            HookDecision::block(format!("{DEFAULT_BLOCK_MESSAGE} The '{kind}' hook failed."))
        }
        _ => HookDecision::allow(),
    }
}
