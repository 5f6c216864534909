//! Lightweight git queries used by the hooks.

use std::path::Path;

use crate::exec::CommandRunner;
use crate::types::{HookError, Result};

/// Read-only git queries against one working directory
#[derive(Debug, Clone, Copy)]
pub struct GitClient<'a> {
    runner: &'a dyn CommandRunner,
    repo_dir: &'a Path,
}

impl<'a> GitClient<'a> {
    pub fn new(runner: &'a dyn CommandRunner, repo_dir: &'a Path) -> Self {
        Self { runner, repo_dir }
    }

    /// Current branch name, `None` on a detached HEAD.
    pub async fn current_branch(&self) -> Result<Option<String>> {
        let output = self.git(&["branch", "--show-current"]).await?;
        Ok(parse_branch(&output))
    }

    /// Number of entries reported by `git status --porcelain`.
    pub async fn uncommitted_file_count(&self) -> Result<usize> {
        let output = self.git(&["status", "--porcelain"]).await?;
        Ok(count_porcelain_entries(&output))
    }

    async fn git(&self, args: &[&str]) -> Result<String> {
        match self.runner.run("git", args, self.repo_dir).await {
            Ok(output) => Ok(output.stdout),
            Err(HookError::CommandFailed { stderr, .. })
                if stderr.to_ascii_lowercase().contains("not a git repository") =>
            {
                Err(HookError::NotARepository(self.repo_dir.to_path_buf()))
            }
            Err(e) => Err(e),
        }
    }
}

fn parse_branch(output: &str) -> Option<String> {
    let branch = output.trim();
    (!branch.is_empty()).then(|| branch.to_string())
}

fn count_porcelain_entries(output: &str) -> usize {
    output.lines().filter(|line| !line.trim().is_empty()).count()
}
