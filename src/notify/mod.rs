//! Desktop and audible notifications
//!
//! Each operating system gets its own [`NotificationSink`]. Sinks shell out to
//! the platform's notifier through a [`CommandRunner`], so a missing notifier
//! or a hung sound player surfaces as an ordinary error.

mod sinks;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::exec::CommandRunner;
use crate::types::Result;

pub use sinks::{LinuxSink, MacOsSink, UnsupportedSink, WindowsSink};

/// Operating system family, as far as notifications are concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
    Unsupported,
}

impl Platform {
    /// Platform this binary was built for
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" => Platform::MacOs,
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            _ => Platform::Unsupported,
        }
    }
}

/// Delivers completion notifications
#[async_trait]
pub trait NotificationSink: Send + Sync + fmt::Debug {
    /// Show a desktop notification
    async fn notify(&self, title: &str, message: &str) -> Result<()>;

    /// Play the completion sound
    async fn play_sound(&self) -> Result<()>;
}

/// Build the sink for `platform`
///
/// Notifier commands run in `work_dir`.
pub fn sink_for(
    platform: Platform,
    runner: Arc<dyn CommandRunner>,
    work_dir: PathBuf,
) -> Box<dyn NotificationSink> {
    match platform {
        Platform::MacOs => Box::new(MacOsSink::new(runner, work_dir)),
        Platform::Linux => Box::new(LinuxSink::new(runner, work_dir)),
        Platform::Windows => Box::new(WindowsSink::new(runner, work_dir)),
        Platform::Unsupported => Box::new(UnsupportedSink::new(std::env::consts::OS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;

    #[test]
    fn test_platform_from_os() {
        assert_eq!(Platform::from_os("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os("linux"), Platform::Linux);
        assert_eq!(Platform::from_os("windows"), Platform::Windows);
        assert_eq!(Platform::from_os("freebsd"), Platform::Unsupported);
    }

    #[tokio::test]
    async fn test_unsupported_sink_reports_failure() {
        let runner: Arc<dyn CommandRunner> = Arc::new(ScriptedRunner::new());
        let sink = sink_for(Platform::Unsupported, runner, PathBuf::from("/tmp"));

        let err = sink.notify("Claude Code", "Task completed").await.unwrap_err();
        assert!(err.is_environment_error());
        assert!(sink.play_sound().await.is_err());
    }
}
