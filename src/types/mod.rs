//! Public types for the lifecycle hooks
//!
//! This module contains the hook protocol types (invocation in, decision out)
//! and the shared configuration and error types.

mod config;
mod decision;
mod error;
mod invocation;

pub use config::{
    CompletionActions, DEFAULT_COMMAND_TIMEOUT_MS, DEFAULT_COMPLETION_LOG, HookConfig,
    MAX_COMMAND_TIMEOUT_MS, TIMEOUT_ENV_VAR, command_timeout,
};
pub use decision::{DEFAULT_BLOCK_MESSAGE, FAIL_OPEN_JSON, HookDecision};
pub use error::{ErrorCategory, HookError, Result};
pub use invocation::{
    COMMAND_ENV_VAR, COMMAND_PAYLOAD_KEY, HookInvocation, HookKind, PROJECT_DIR_ENV_VAR,
    is_relevant_env_var,
};
