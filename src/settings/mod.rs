//! Settings management
//!
//! Loads and merges hook settings from multiple sources:
//! - User settings: `~/.claude/lifecycle-hooks.json`
//! - Project settings: `.claude/lifecycle-hooks.json`
//! - Local settings: `.claude/lifecycle-hooks.local.json`
//!
//! Priority: Local > Project > User

mod manager;

pub use manager::{HookSettings, PatternSpec, SettingsManager};
