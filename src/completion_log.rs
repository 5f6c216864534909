//! Append-only task completion log

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::Result;

/// Text written after the timestamp of every entry
pub const COMPLETION_ENTRY_TEXT: &str = "Task completed";

/// One line per completed task: `<timestamp> - Task completed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionLog {
    path: PathBuf,
}

impl CompletionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format a single entry, newline included
    pub fn format_entry(at: DateTime<Utc>) -> String {
        format!(
            "{} - {COMPLETION_ENTRY_TEXT}\n",
            at.to_rfc3339_opts(SecondsFormat::Millis, true)
        )
    }

    /// Append one entry
    ///
    /// The file is created if needed; its parent directory is not.
    pub fn append(&self, at: DateTime<Utc>) -> Result<()> {
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(Self::format_entry(at).as_bytes())?;
        Ok(())
    }
}
