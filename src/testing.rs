//! Test doubles for the hook collaborators.
//!
//! Provides:
//! - [`ScriptedRunner`]: a `CommandRunner` answering from a fixed script
//! - [`RecordingSink`]: a `NotificationSink` that records or fails every call

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::exec::{CommandOutput, CommandRunner};
use crate::notify::NotificationSink;
use crate::types::{HookError, Result};

#[derive(Debug, Clone)]
enum Scripted {
    Success(String),
    Failure { code: i32, stderr: String },
    Timeout,
}

/// Command runner that replays scripted results
///
/// Commands are keyed by `"program arg1 arg2"`. Unscripted commands behave
/// like a missing program.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    script: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_success(mut self, command_line: &str, stdout: &str) -> Self {
        self.script
            .insert(command_line.to_string(), Scripted::Success(stdout.to_string()));
        self
    }

    pub fn on_failure(mut self, command_line: &str, code: i32, stderr: &str) -> Self {
        self.script.insert(
            command_line.to_string(),
            Scripted::Failure {
                code,
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn on_timeout(mut self, command_line: &str) -> Self {
        self.script
            .insert(command_line.to_string(), Scripted::Timeout);
        self
    }

    /// Command lines run or started so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, program: &str, args: &[&str]) -> String {
        let command_line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(command_line.clone());
        command_line
    }
}

fn not_scripted(program: &str) -> HookError {
    HookError::CommandUnavailable {
        program: program.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not scripted"),
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<CommandOutput> {
        let command_line = self.record(program, args);

        match self.script.get(&command_line) {
            Some(Scripted::Success(stdout)) => Ok(CommandOutput {
                stdout: stdout.clone(),
                stderr: String::new(),
            }),
            Some(Scripted::Failure { code, stderr }) => {
                Err(HookError::command_failed(program, Some(*code), stderr.clone()))
            }
            Some(Scripted::Timeout) => Err(HookError::command_timeout(program, 2_000)),
            None => Err(not_scripted(program)),
        }
    }

    /// Any scripted entry counts as a successful start
    async fn spawn_detached(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<()> {
        let command_line = self.record(program, args);
        if self.script.contains_key(&command_line) {
            Ok(())
        } else {
            Err(not_scripted(program))
        }
    }
}

/// Notification sink that records deliveries, or fails them all
#[derive(Debug, Default)]
pub struct RecordingSink {
    fail: bool,
    notifications: Mutex<Vec<(String, String)>>,
    sounds: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn notifications(&self) -> Vec<(String, String)> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn sounds(&self) -> usize {
        self.sounds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, title: &str, message: &str) -> Result<()> {
        if self.fail {
            return Err(HookError::command_failed("notify-send", Some(1), "no display"));
        }
        self.notifications
            .lock()
            .unwrap()
            .push((title.to_string(), message.to_string()));
        Ok(())
    }

    async fn play_sound(&self) -> Result<()> {
        if self.fail {
            return Err(HookError::command_timeout("paplay", 2_000));
        }
        self.sounds.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
