//! Task completion side effects (`post-task`)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Hook;
use crate::completion_log::CompletionLog;
use crate::notify::NotificationSink;
use crate::tracing::BestEffortExt;
use crate::types::{CompletionActions, HookDecision, HookInvocation, HookKind};

/// Desktop notification title
pub const NOTIFICATION_TITLE: &str = "Claude Code";
/// Desktop notification body
pub const NOTIFICATION_MESSAGE: &str = "Task completed";

/// Notifies, plays a sound and logs when a task finishes
///
/// Every side effect is optional and individually guarded. The hook always
/// allows.
#[derive(Debug)]
pub struct TaskCompleteHook {
    sink: Box<dyn NotificationSink>,
    log: CompletionLog,
    actions: CompletionActions,
    clock: fn() -> DateTime<Utc>,
}

impl TaskCompleteHook {
    pub fn new(
        sink: Box<dyn NotificationSink>,
        log: CompletionLog,
        actions: CompletionActions,
    ) -> Self {
        Self {
            sink,
            log,
            actions,
            clock: Utc::now,
        }
    }

    /// Replace the timestamp source for log entries
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl Hook for TaskCompleteHook {
    fn kind(&self) -> HookKind {
        HookKind::PostTask
    }

    fn name(&self) -> &'static str {
        "on-task-complete"
    }

    async fn run(&self, _invocation: &HookInvocation) -> HookDecision {
        if self.actions.notify_system {
            self.sink
                .notify(NOTIFICATION_TITLE, NOTIFICATION_MESSAGE)
                .await
                .best_effort("notify_system");
        }

        if self.actions.play_sound {
            self.sink.play_sound().await.best_effort("play_sound");
        }

        if self.actions.log_completion
            && self
                .log
                .append((self.clock)())
                .best_effort("log_completion")
                .is_some()
        {
            tracing::debug!(path = %self.log.path().display(), "Task completion logged");
        }

        HookDecision::allow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSink;
    use chrono::TimeZone;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn invocation(dir: &std::path::Path) -> HookInvocation {
        HookInvocation::new(HookKind::PostTask, dir)
    }

    /// Shares a recording sink with the hook so the test can inspect it
    #[derive(Debug)]
    struct SharedSink(Arc<RecordingSink>);

    #[async_trait]
    impl NotificationSink for SharedSink {
        async fn notify(&self, title: &str, message: &str) -> crate::types::Result<()> {
            self.0.notify(title, message).await
        }

        async fn play_sound(&self) -> crate::types::Result<()> {
            self.0.play_sound().await
        }
    }

    #[tokio::test]
    async fn test_all_side_effects() {
        let temp_dir = TempDir::new().unwrap();
        let sink = Arc::new(RecordingSink::new());
        let log = CompletionLog::new(temp_dir.path().join("done.log"));
        let hook = TaskCompleteHook::new(
            Box::new(SharedSink(sink.clone())),
            log.clone(),
            CompletionActions::default(),
        )
        .with_clock(fixed_clock);

        let decision = hook.run(&invocation(temp_dir.path())).await;

        assert_eq!(decision, HookDecision::allow());
        assert_eq!(
            sink.notifications(),
            vec![("Claude Code".to_string(), "Task completed".to_string())]
        );
        assert_eq!(sink.sounds(), 1);
        assert_eq!(
            std::fs::read_to_string(log.path()).unwrap(),
            "2023-11-14T22:13:20.000Z - Task completed\n"
        );
    }

    #[tokio::test]
    async fn test_allows_when_everything_fails() {
        let temp_dir = TempDir::new().unwrap();
        let hook = TaskCompleteHook::new(
            Box::new(RecordingSink::failing()),
            CompletionLog::new(temp_dir.path().join("no-such-dir").join("done.log")),
            CompletionActions::default(),
        );

        let decision = hook.run(&invocation(temp_dir.path())).await;
        assert_eq!(decision, HookDecision::allow());
    }

    #[tokio::test]
    async fn test_disabled_actions_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let sink = Arc::new(RecordingSink::new());
        let log = CompletionLog::new(temp_dir.path().join("done.log"));
        let hook = TaskCompleteHook::new(
            Box::new(SharedSink(sink.clone())),
            log.clone(),
            CompletionActions {
                notify_system: false,
                play_sound: true,
                log_completion: false,
            },
        );

        hook.run(&invocation(temp_dir.path())).await;

        assert!(sink.notifications().is_empty());
        assert_eq!(sink.sounds(), 1);
        assert!(!log.path().exists());
    }

    #[tokio::test]
    async fn test_sound_failure_does_not_skip_log() {
        let temp_dir = TempDir::new().unwrap();
        let log = CompletionLog::new(temp_dir.path().join("done.log"));
        let hook = TaskCompleteHook::new(
            Box::new(RecordingSink::failing()),
            log.clone(),
            CompletionActions::default(),
        )
        .with_clock(fixed_clock);

        hook.run(&invocation(temp_dir.path())).await;

        assert!(log.path().exists());
    }
}
