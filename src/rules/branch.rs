//! Protected branch set

use globset::{Glob, GlobSet, GlobSetBuilder};

/// Branches protected when no settings override them
pub const DEFAULT_PROTECTED_BRANCHES: &[&str] = &["main", "master", "production", "prod"];

/// Branch names that must not be edited directly
///
/// Entries containing glob metacharacters (`*`, `?`, `[`, `{`) are matched as
/// glob patterns, everything else by exact name.
#[derive(Debug, Clone)]
pub struct ProtectedBranchSet {
    names: Vec<String>,
    patterns: GlobSet,
}

impl ProtectedBranchSet {
    /// Build a set from names and glob patterns
    ///
    /// A pattern that fails to compile is kept as an exact name.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = Vec::new();
        let mut builder = GlobSetBuilder::new();

        for entry in entries {
            let entry = entry.into();
            if !is_glob(&entry) {
                names.push(entry);
                continue;
            }
            match Glob::new(&entry) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => {
                    tracing::warn!(pattern = %entry, error = %e, "Invalid protected branch pattern, matching literally");
                    names.push(entry);
                }
            }
        }

        let patterns = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to build protected branch patterns");
            GlobSet::empty()
        });

        Self { names, patterns }
    }

    /// Check whether a branch is protected
    pub fn is_protected(&self, branch: &str) -> bool {
        if branch.is_empty() {
            return false;
        }
        self.names.iter().any(|name| name == branch) || self.patterns.is_match(branch)
    }
}

impl Default for ProtectedBranchSet {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED_BRANCHES.iter().copied())
    }
}

fn is_glob(entry: &str) -> bool {
    entry.contains(['*', '?', '[', '{'])
}
