//! Per-platform notification sinks

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use super::NotificationSink;
use crate::exec::CommandRunner;
use crate::tracing::ErrorTraceExt;
use crate::types::{HookError, Result};

const MACOS_SOUND: &str = "/System/Library/Sounds/Glass.aiff";
const LINUX_SOUND: &str = "/usr/share/sounds/freedesktop/stereo/complete.oga";
const LINUX_FALLBACK_SOUND: &str = "/usr/share/sounds/sound-icons/prompt.wav";
const WINDOWS_SOUND: &str = r"C:\Windows\Media\notify.wav";
const WINDOWS_APP_ID: &str = "Claude Code";

/// Quote a value as an AppleScript string literal
fn applescript_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Quote a value as a single-quoted PowerShell string literal
fn powershell_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `osascript` notifications and `afplay` sounds
///
/// `afplay` is started detached so the hook does not wait for playback.
#[derive(Debug, Clone)]
pub struct MacOsSink {
    runner: Arc<dyn CommandRunner>,
    work_dir: PathBuf,
}

impl MacOsSink {
    pub fn new(runner: Arc<dyn CommandRunner>, work_dir: PathBuf) -> Self {
        Self { runner, work_dir }
    }

    fn notification_script(title: &str, message: &str) -> String {
        format!(
            "display notification {} with title {}",
            applescript_string(message),
            applescript_string(title)
        )
    }
}

#[async_trait]
impl NotificationSink for MacOsSink {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        let script = Self::notification_script(title, message);
        self.runner
            .run("osascript", &["-e", &script], &self.work_dir)
            .await?;
        Ok(())
    }

    async fn play_sound(&self) -> Result<()> {
        self.runner
            .spawn_detached("afplay", &[MACOS_SOUND], &self.work_dir)
            .await
    }
}

/// `notify-send` notifications and PulseAudio/ALSA sounds
#[derive(Debug, Clone)]
pub struct LinuxSink {
    runner: Arc<dyn CommandRunner>,
    work_dir: PathBuf,
}

impl LinuxSink {
    pub fn new(runner: Arc<dyn CommandRunner>, work_dir: PathBuf) -> Self {
        Self { runner, work_dir }
    }
}

#[async_trait]
impl NotificationSink for LinuxSink {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        self.runner
            .run("notify-send", &[title, message], &self.work_dir)
            .await?;
        Ok(())
    }

    /// Tries `paplay` first, then `aplay`
    async fn play_sound(&self) -> Result<()> {
        match self
            .runner
            .run("paplay", &[LINUX_SOUND], &self.work_dir)
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                e.trace_error();
                self.runner
                    .run("aplay", &[LINUX_FALLBACK_SOUND], &self.work_dir)
                    .await?;
                Ok(())
            }
        }
    }
}

/// PowerShell toast notifications and `SoundPlayer` sounds
#[derive(Debug, Clone)]
pub struct WindowsSink {
    runner: Arc<dyn CommandRunner>,
    work_dir: PathBuf,
}

impl WindowsSink {
    pub fn new(runner: Arc<dyn CommandRunner>, work_dir: PathBuf) -> Self {
        Self { runner, work_dir }
    }

    fn toast_script(title: &str, message: &str) -> String {
        [
            "[Windows.UI.Notifications.ToastNotificationManager, Windows.UI.Notifications, ContentType = WindowsRuntime] | Out-Null;".to_string(),
            "$template = [Windows.UI.Notifications.ToastNotificationManager]::GetTemplateContent([Windows.UI.Notifications.ToastTemplateType]::ToastText02);".to_string(),
            "$textNodes = $template.GetElementsByTagName('text');".to_string(),
            format!(
                "$textNodes.Item(0).AppendChild($template.CreateTextNode({})) | Out-Null;",
                powershell_string(title)
            ),
            format!(
                "$textNodes.Item(1).AppendChild($template.CreateTextNode({})) | Out-Null;",
                powershell_string(message)
            ),
            "$toast = [Windows.UI.Notifications.ToastNotification]::new($template);".to_string(),
            format!(
                "[Windows.UI.Notifications.ToastNotificationManager]::CreateToastNotifier({}).Show($toast)",
                powershell_string(WINDOWS_APP_ID)
            ),
        ]
        .join(" ")
    }

    fn sound_script() -> String {
        format!(
            "(New-Object Media.SoundPlayer {}).PlaySync()",
            powershell_string(WINDOWS_SOUND)
        )
    }

    async fn powershell(&self, script: &str) -> Result<()> {
        self.runner
            .run(
                "powershell",
                &["-NoProfile", "-NonInteractive", "-Command", script],
                &self.work_dir,
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for WindowsSink {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        self.powershell(&Self::toast_script(title, message)).await
    }

    async fn play_sound(&self) -> Result<()> {
        self.powershell(&Self::sound_script()).await
    }
}

/// Sink for platforms without a known notifier
///
/// Every call fails with [`HookError::UnsupportedPlatform`].
#[derive(Debug, Clone)]
pub struct UnsupportedSink {
    os: String,
}

impl UnsupportedSink {
    pub fn new(os: impl Into<String>) -> Self {
        Self { os: os.into() }
    }
}

#[async_trait]
impl NotificationSink for UnsupportedSink {
    async fn notify(&self, _title: &str, _message: &str) -> Result<()> {
        Err(HookError::unsupported_platform(self.os.clone()))
    }

    async fn play_sound(&self) -> Result<()> {
        Err(HookError::unsupported_platform(self.os.clone()))
    }
}
