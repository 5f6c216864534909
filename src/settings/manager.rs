//! Settings manager implementation
//!
//! Handles loading, merging, and accessing hook settings from multiple sources.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tracing::ErrorTraceExt;
use crate::types::{HookError, Result};

/// Settings file names
const USER_SETTINGS_DIR: &str = ".claude";
const PROJECT_SETTINGS_DIR: &str = ".claude";
const SETTINGS_FILE: &str = "lifecycle-hooks.json";
const LOCAL_SETTINGS_FILE: &str = "lifecycle-hooks.local.json";

/// A user-supplied dangerous command pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Regular expression tested against the command text
    pub pattern: String,
    /// Human-readable description of what the pattern catches
    pub label: String,
}

/// Hook settings structure
///
/// Every field is optional so that layers only override what they set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSettings {
    /// Branch names (or glob patterns) that must not be edited directly
    #[serde(default)]
    pub protected_branches: Option<Vec<String>>,

    /// Patterns blocked in addition to the built-in rules
    #[serde(default)]
    pub extra_dangerous_patterns: Option<Vec<PatternSpec>>,

    /// Show a desktop notification when a task completes
    #[serde(default)]
    pub notify_system: Option<bool>,

    /// Play a sound when a task completes
    #[serde(default)]
    pub notify_sound: Option<bool>,

    /// Append to the completion log when a task completes
    #[serde(default)]
    pub log_completion: Option<bool>,

    /// Completion log path, relative to the project directory
    #[serde(default)]
    pub completion_log: Option<String>,

    /// Timeout for external commands in milliseconds
    #[serde(default)]
    pub command_timeout_ms: Option<u64>,
}

impl HookSettings {
    /// Create empty settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another settings layer into this one
    ///
    /// Values from `other` take precedence over `self`. Extra patterns are
    /// combined from all layers; protected branches are replaced.
    pub fn merge(&mut self, other: HookSettings) {
        if other.protected_branches.is_some() {
            self.protected_branches = other.protected_branches;
        }
        if let Some(other_patterns) = other.extra_dangerous_patterns {
            self.extra_dangerous_patterns
                .get_or_insert_with(Vec::new)
                .extend(other_patterns);
        }
        if other.notify_system.is_some() {
            self.notify_system = other.notify_system;
        }
        if other.notify_sound.is_some() {
            self.notify_sound = other.notify_sound;
        }
        if other.log_completion.is_some() {
            self.log_completion = other.log_completion;
        }
        if other.completion_log.is_some() {
            self.completion_log = other.completion_log;
        }
        if other.command_timeout_ms.is_some() {
            self.command_timeout_ms = other.command_timeout_ms;
        }
    }
}

/// Settings manager for loading and accessing hook settings
#[derive(Debug)]
pub struct SettingsManager {
    /// The merged settings
    settings: HookSettings,
    /// Project working directory
    project_dir: PathBuf,
}

impl SettingsManager {
    /// Create a new settings manager and load settings
    ///
    /// Reads user settings from the home directory and project settings from
    /// `project_dir`.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self::with_home(project_dir, dirs::home_dir().as_deref())
    }

    /// Create a settings manager with an explicit home directory
    ///
    /// Passing `None` skips the user layer.
    pub fn with_home(project_dir: impl AsRef<Path>, home_dir: Option<&Path>) -> Self {
        let project_dir = project_dir.as_ref().to_path_buf();
        let settings = Self::load_all_settings(&project_dir, home_dir);

        Self {
            settings,
            project_dir,
        }
    }

    /// Load and merge all settings sources
    ///
    /// Priority: Local > Project > User
    fn load_all_settings(project_dir: &Path, home_dir: Option<&Path>) -> HookSettings {
        let mut settings = HookSettings::new();

        let mut sources = Vec::with_capacity(3);
        if let Some(home) = home_dir {
            sources.push(home.join(USER_SETTINGS_DIR).join(SETTINGS_FILE));
        }
        sources.push(project_dir.join(PROJECT_SETTINGS_DIR).join(SETTINGS_FILE));
        sources.push(
            project_dir
                .join(PROJECT_SETTINGS_DIR)
                .join(LOCAL_SETTINGS_FILE),
        );

        for path in sources {
            match Self::load_settings_file(&path) {
                Ok(Some(layer)) => {
                    tracing::debug!(path = %path.display(), "Loaded hook settings");
                    settings.merge(layer);
                }
                Ok(None) => {}
                Err(e) => {
                    e.trace_error();
                }
            }
        }

        settings
    }

    /// Load settings from a file, `None` when it does not exist
    fn load_settings_file(path: &Path) -> Result<Option<HookSettings>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            HookError::settings(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| HookError::settings(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Get the merged settings
    pub fn settings(&self) -> &HookSettings {
        &self.settings
    }

    /// Get the project directory
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_settings(dir: &Path, file: &str, content: &str) {
        let settings_dir = dir.join(".claude");
        std::fs::create_dir_all(&settings_dir).unwrap();
        std::fs::write(settings_dir.join(file), content).unwrap();
    }

    #[test]
    fn test_settings_default() {
        let settings = HookSettings::new();
        assert!(settings.protected_branches.is_none());
        assert!(settings.notify_sound.is_none());
        assert!(settings.command_timeout_ms.is_none());
    }

    #[test]
    fn test_settings_merge() {
        let mut base = HookSettings {
            protected_branches: Some(vec!["main".to_string()]),
            notify_sound: Some(true),
            extra_dangerous_patterns: Some(vec![PatternSpec {
                pattern: "shred".to_string(),
                label: "shred".to_string(),
            }]),
            ..Default::default()
        };

        let overlay = HookSettings {
            protected_branches: Some(vec!["trunk".to_string()]),
            notify_sound: Some(false),
            extra_dangerous_patterns: Some(vec![PatternSpec {
                pattern: "wipefs".to_string(),
                label: "wipefs".to_string(),
            }]),
            ..Default::default()
        };

        base.merge(overlay);

        assert_eq!(base.protected_branches, Some(vec!["trunk".to_string()]));
        assert_eq!(base.notify_sound, Some(false));
        assert_eq!(base.extra_dangerous_patterns.unwrap().len(), 2);
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::with_home(temp_dir.path(), None);

        assert_eq!(manager.settings(), &HookSettings::default());
        assert_eq!(manager.project_dir(), temp_dir.path());
    }

    #[test]
    fn test_load_project_settings() {
        let temp_dir = TempDir::new().unwrap();
        write_settings(
            temp_dir.path(),
            "lifecycle-hooks.json",
            r#"{"protectedBranches": ["main", "release/*"], "commandTimeoutMs": 500}"#,
        );

        let manager = SettingsManager::with_home(temp_dir.path(), None);

        assert_eq!(
            manager.settings().protected_branches,
            Some(vec!["main".to_string(), "release/*".to_string()])
        );
        assert_eq!(manager.settings().command_timeout_ms, Some(500));
    }

    #[test]
    fn test_local_overrides_project_overrides_user() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        write_settings(
            home.path(),
            "lifecycle-hooks.json",
            r#"{"notifySound": false, "notifySystem": false, "logCompletion": false}"#,
        );
        write_settings(
            project.path(),
            "lifecycle-hooks.json",
            r#"{"notifySystem": true, "completionLog": "logs/done.log"}"#,
        );
        write_settings(
            project.path(),
            "lifecycle-hooks.local.json",
            r#"{"completionLog": "local.log"}"#,
        );

        let manager = SettingsManager::with_home(project.path(), Some(home.path()));
        let settings = manager.settings();

        assert_eq!(settings.notify_sound, Some(false));
        assert_eq!(settings.notify_system, Some(true));
        assert_eq!(settings.log_completion, Some(false));
        assert_eq!(settings.completion_log.as_deref(), Some("local.log"));
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        write_settings(temp_dir.path(), "lifecycle-hooks.json", "{ not json");
        write_settings(
            temp_dir.path(),
            "lifecycle-hooks.local.json",
            r#"{"notifySound": false}"#,
        );

        let manager = SettingsManager::with_home(temp_dir.path(), None);

        assert_eq!(manager.settings().notify_sound, Some(false));
        assert!(manager.settings().protected_branches.is_none());
    }
}
