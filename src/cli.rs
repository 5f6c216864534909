//! Command-line interface definitions
//!
//! Provides CLI argument parsing using clap for the lifecycle hooks binary.

use std::path::PathBuf;

use clap::Parser;

use crate::types::{HookKind, PROJECT_DIR_ENV_VAR};

/// Lifecycle hooks for Claude Code - prints one JSON decision on stdout
#[derive(Parser, Debug, Clone)]
#[command(name = "lifecycle-hooks")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Hook to run
    #[arg(value_enum)]
    pub hook: HookKind,

    /// Command text for validate-command
    #[arg(allow_hyphen_values = true)]
    pub payload: Option<String>,

    /// Read the hook input as JSON from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Project directory the hook operates in
    #[arg(short = 'C', long, value_name = "DIR", env = PROJECT_DIR_ENV_VAR)]
    pub project_dir: Option<PathBuf>,

    /// Enable diagnostic mode (auto-log to temp file)
    #[arg(short, long)]
    pub diagnostic: bool,

    /// Log directory (implies diagnostic mode)
    #[arg(short = 'l', long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log file name (implies diagnostic mode)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub log_file: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    /// Note: RUST_LOG env var takes priority over this flag
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors)
    /// Note: RUST_LOG env var takes priority over this flag
    #[arg(short, long)]
    pub quiet: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            hook: HookKind::PreCommand,
            payload: None,
            stdin: false,
            project_dir: None,
            diagnostic: false,
            log_dir: None,
            log_file: None,
            verbose: 0,
            quiet: false,
        }
    }
}

impl Cli {
    /// Check if diagnostic mode is enabled (output to file)
    ///
    /// Returns true if `--diagnostic` is set, or if `--log-dir` or `--log-file` is specified.
    pub fn is_diagnostic(&self) -> bool {
        self.diagnostic || self.log_dir.is_some() || self.log_file.is_some()
    }

    /// Get the log level based on CLI arguments
    ///
    /// - `--quiet`: ERROR
    /// - default: WARN
    /// - `-v`: INFO
    /// - `-vv`: DEBUG
    /// - `-vvv` or more: TRACE
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else {
            match self.verbose {
                0 => tracing::Level::WARN,
                1 => tracing::Level::INFO,
                2 => tracing::Level::DEBUG,
                _ => tracing::Level::TRACE,
            }
        }
    }

    /// Get the log file path for diagnostic mode
    ///
    /// Uses the specified log directory and file name, or defaults to:
    /// - Directory: system temp directory
    /// - File: `lifecycle-hooks-{timestamp}.log`
    pub fn log_path(&self) -> PathBuf {
        let dir = self.log_dir.clone().unwrap_or_else(std::env::temp_dir);

        let filename = self.log_file.clone().unwrap_or_else(|| {
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            format!("lifecycle-hooks-{timestamp}.log")
        });

        dir.join(filename)
    }
}
