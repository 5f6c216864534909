//! Error tracing extensions
//!
//! Hook failures are recovered locally, so they only ever show up in logs.
//! These helpers log an error with its category and source chain, and turn
//! a fallible step into an optional value.

use crate::types::{ErrorCategory, HookError};
use std::error::Error as _;

/// Extension trait for adding tracing context to errors
pub trait ErrorTraceExt {
    /// Log error with its category and error chain
    ///
    /// Environment and external-command failures are expected during normal
    /// operation and are logged at debug level; internal errors at warn.
    fn trace_error(&self) -> &Self;
}

impl ErrorTraceExt for HookError {
    fn trace_error(&self) -> &Self {
        let category = self.category();

        // Get the error chain
        let mut error_chain = Vec::new();
        let mut current_source = self.source();
        while let Some(source) = current_source {
            error_chain.push(source.to_string());
            current_source = source.source();
        }

        match category {
            ErrorCategory::Internal => tracing::warn!(
                error = %self,
                category = category.as_str(),
                error_chain = ?error_chain,
                "Hook step failed"
            ),
            ErrorCategory::Environment | ErrorCategory::ExternalCommand => tracing::debug!(
                error = %self,
                category = category.as_str(),
                error_chain = ?error_chain,
                "Hook step skipped"
            ),
        }

        self
    }
}

/// Run a fallible step and keep going on failure
pub trait BestEffortExt<T> {
    /// Log the error (if any) under `step` and return the value as an option
    fn best_effort(self, step: &'static str) -> Option<T>;
}

impl<T> BestEffortExt<T> for Result<T, HookError> {
    fn best_effort(self, step: &'static str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(step, "Best-effort step did not complete");
                e.trace_error();
                None
            }
        }
    }
}
