//! Error types for the lifecycle hooks
//!
//! Hooks never surface these errors to the host. Every failure is recovered
//! locally and turned into a decision; the category decides how loudly it is
//! logged.

use std::path::PathBuf;

use thiserror::Error;

/// Broad classification of hook failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The environment lacks something a hook looks for (no repository,
    /// no manifest, no notifier on this platform)
    Environment,
    /// An external command could not be started, failed, or timed out
    ExternalCommand,
    /// A bug or invalid configuration on our side
    Internal,
}

impl ErrorCategory {
    /// Stable name used in log fields
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Environment => "environment",
            ErrorCategory::ExternalCommand => "external_command",
            ErrorCategory::Internal => "internal",
        }
    }
}

/// Main error type for the lifecycle hooks
#[derive(Debug, Error)]
pub enum HookError {
    // === Environment errors ===
    /// Directory is not inside a git work tree
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    /// Dependency manifest does not exist
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    /// Dependency manifest exists but cannot be parsed
    #[error("Invalid manifest {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// No notifier is known for this operating system
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Settings file could not be read or parsed
    #[error("Settings error: {0}")]
    Settings(String),

    // === External command errors ===
    /// Program could not be spawned (missing binary, bad working directory)
    #[error("Command unavailable: {program}: {source}")]
    CommandUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Program ran but exited unsuccessfully
    #[error("Command failed: {program} (exit code {code:?}): {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Program did not finish within the allowed time
    #[error("Command timed out after {timeout_ms}ms: {program}")]
    CommandTimeout { program: String, timeout_ms: u64 },

    // === Internal errors ===
    /// A dangerous-command pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the lifecycle hooks
pub type Result<T> = std::result::Result<T, HookError>;

impl HookError {
    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            HookError::NotARepository(_)
            | HookError::ManifestNotFound(_)
            | HookError::InvalidManifest { .. }
            | HookError::UnsupportedPlatform(_)
            | HookError::Settings(_) => ErrorCategory::Environment,
            HookError::CommandUnavailable { .. }
            | HookError::CommandFailed { .. }
            | HookError::CommandTimeout { .. } => ErrorCategory::ExternalCommand,
            HookError::InvalidPattern { .. } | HookError::Io(_) => ErrorCategory::Internal,
        }
    }

    /// Check if this error only means the environment lacks something
    pub fn is_environment_error(&self) -> bool {
        self.category() == ErrorCategory::Environment
    }

    /// Check if this error came from running an external command
    pub fn is_external_command_error(&self) -> bool {
        self.category() == ErrorCategory::ExternalCommand
    }

    // === Constructor helpers ===

    /// Create a settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        HookError::Settings(msg.into())
    }

    /// Create an unsupported platform error
    pub fn unsupported_platform(os: impl Into<String>) -> Self {
        HookError::UnsupportedPlatform(os.into())
    }

    /// Create a command failed error
    pub fn command_failed(
        program: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        HookError::CommandFailed {
            program: program.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Create a command timeout error
    pub fn command_timeout(program: impl Into<String>, timeout_ms: u64) -> Self {
        HookError::CommandTimeout {
            program: program.into(),
            timeout_ms,
        }
    }
}
