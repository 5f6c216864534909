//! Dangerous command rules
//!
//! An ordered list of `(regex, label)` rules describing command shapes that
//! can destroy data. The built-in list is compiled once per process.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::settings::PatternSpec;
use crate::tracing::ErrorTraceExt;
use crate::types::{HookError, Result};

/// Advisory message returned for every blocked command
pub const BLOCKED_COMMAND_MESSAGE: &str = "Command blocked for security. This command could cause data loss. If you really need to run it, do so manually in the terminal.";

/// Built-in rules, in evaluation order
const BUILTIN_RULES: &[(&str, &str)] = &[
    (r"rm\s+-rf\s+[/~]", "recursive forced delete of root or home path"),
    (
        concat!(
            r"\brm\s+(?:-\S*\s+)*",
            r"(?:-[a-zA-Z]*(?:[rR][a-zA-Z]*f|f[a-zA-Z]*[rR])[a-zA-Z]*",
            r"|(?:-[a-zA-Z]*[rR][a-zA-Z]*|--recursive)\s+(?:-\S*\s+)*(?:-[a-zA-Z]*f[a-zA-Z]*|--force)",
            r"|(?:-[a-zA-Z]*f[a-zA-Z]*|--force)\s+(?:-\S*\s+)*(?:-[a-zA-Z]*[rR][a-zA-Z]*|--recursive))",
            r"\s+(?:-\S*\s+)*[/~]",
        ),
        "recursive forced delete of root or home path, any flag spelling",
    ),
    (r"rm\s+-rf\s+\*", "recursive forced delete with wildcard"),
    (r"git\s+push\s+--force", "git force push"),
    (
        r"\bgit\s+push\b[^;&|\n]*\s(?:-[a-zA-Z]*f[a-zA-Z]*|--force(?:-with-lease)?(?:=\S*)?)(?:\s|$)",
        "git force push, any flag position",
    ),
    (r"git\s+reset\s+--hard", "git hard reset"),
    (r"git\s+clean\s+-fd", "forced git clean"),
    (r"(?i)DROP\s+DATABASE", "SQL drop database"),
    (r"(?i)DROP\s+TABLE", "SQL drop table"),
    (r"(?i)TRUNCATE\s+TABLE", "SQL truncate table"),
    (r"(?i)DELETE\s+FROM\s+\w+\s*;", "SQL delete without WHERE clause"),
    (r">\s*/dev/sda", "raw write to block device"),
    (r"mkfs\.", "filesystem formatting"),
    (r"dd\s+if=", "low-level disk duplication"),
];

static BUILTIN_RULE_SET: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    BUILTIN_RULES
        .iter()
        .filter_map(|(pattern, label)| match PatternRule::new(pattern, *label) {
            Ok(rule) => Some(rule),
            Err(e) => {
                e.trace_error();
                None
            }
        })
        .collect()
});

/// A single tagged rule
#[derive(Debug, Clone)]
pub struct PatternRule {
    regex: Regex,
    label: String,
}

impl PatternRule {
    /// Compile a rule
    pub fn new(pattern: &str, label: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| HookError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            regex,
            label: label.into(),
        })
    }

    /// What the rule catches
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The source regular expression
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Test the rule against command text
    pub fn is_match(&self, command: &str) -> bool {
        self.regex.is_match(command)
    }
}

/// Anything that can recognise dangerous commands
pub trait CommandMatcher: Send + Sync + fmt::Debug {
    /// First rule matching the command, in evaluation order
    fn first_match(&self, command: &str) -> Option<&PatternRule>;

    /// Whether any rule matches
    fn is_dangerous(&self, command: &str) -> bool {
        self.first_match(command).is_some()
    }
}

/// The ordered rule list used by the command validation hook
#[derive(Debug, Clone)]
pub struct DangerousCommandRules {
    rules: Vec<PatternRule>,
}

impl DangerousCommandRules {
    /// The built-in rules only
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULE_SET.clone(),
        }
    }

    /// Append user rules after the built-in ones
    ///
    /// Patterns that fail to compile are logged and skipped.
    pub fn with_extra(mut self, specs: &[PatternSpec]) -> Self {
        for spec in specs {
            match PatternRule::new(&spec.pattern, spec.label.clone()) {
                Ok(rule) => self.rules.push(rule),
                Err(e) => {
                    e.trace_error();
                }
            }
        }
        self
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for DangerousCommandRules {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CommandMatcher for DangerousCommandRules {
    fn first_match(&self, command: &str) -> Option<&PatternRule> {
        self.rules.iter().find(|rule| rule.is_match(command))
    }
}
