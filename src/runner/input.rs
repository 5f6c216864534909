//! Building a `HookInvocation` from the process inputs

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::cli::Cli;
use crate::types::{COMMAND_PAYLOAD_KEY, HookInvocation};

/// Field of the stdin object holding the tool arguments
const TOOL_INPUT_KEY: &str = "tool_input";
/// Field of the stdin object naming the working directory
const CWD_KEY: &str = "cwd";

/// Hook input read from stdin
///
/// Only string values are kept. Fields of `tool_input` take precedence over
/// top-level fields of the same name.
#[derive(Debug, Default, PartialEq, Eq)]
struct StdinInput {
    cwd: Option<PathBuf>,
    fields: Vec<(String, String)>,
}

impl StdinInput {
    fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::default();
        }

        let object = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "Hook input is not a JSON object, ignoring");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Malformed hook input on stdin, ignoring");
                return Self::default();
            }
        };

        let mut input = Self {
            cwd: object
                .get(CWD_KEY)
                .and_then(Value::as_str)
                .filter(|cwd| !cwd.is_empty())
                .map(PathBuf::from),
            fields: Vec::new(),
        };

        input.fields.extend(string_fields(&object));
        if let Some(Value::Object(tool_input)) = object.get(TOOL_INPUT_KEY) {
            input.fields.extend(string_fields(tool_input));
        }
        input
    }
}

fn string_fields(
    object: &serde_json::Map<String, Value>,
) -> impl Iterator<Item = (String, String)> + '_ {
    object
        .iter()
        .filter_map(|(key, value)| value.as_str().map(|s| (key.clone(), s.to_string())))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Assemble the invocation for one run
///
/// Directory precedence: `--project-dir` (or `CLAUDE_PROJECT_DIR`), then the
/// `cwd` field of the stdin input, then `process_cwd`. A positional payload
/// overrides any `command` read from stdin.
pub fn build_invocation<I, K, V>(
    cli: &Cli,
    stdin_text: Option<&str>,
    env: I,
    process_cwd: &Path,
) -> HookInvocation
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let stdin_input = stdin_text.map(StdinInput::parse).unwrap_or_default();

    let cwd = cli
        .project_dir
        .clone()
        .or(stdin_input.cwd)
        .unwrap_or_else(|| process_cwd.to_path_buf());

    let mut invocation = HookInvocation::new(cli.hook, cwd).with_environment(env);
    for (key, value) in stdin_input.fields {
        invocation = invocation.with_payload(key, value);
    }
    if let Some(payload) = &cli.payload {
        invocation = invocation.with_payload(COMMAND_PAYLOAD_KEY, payload.clone());
    }

    invocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{COMMAND_ENV_VAR, HookKind};
    use pretty_assertions::assert_eq;

    fn no_env() -> Vec<(String, String)> {
        Vec::new()
    }

    fn cli(hook: HookKind) -> Cli {
        Cli {
            hook,
            ..Default::default()
        }
    }

    #[test]
    fn test_positional_payload() {
        let cli = Cli {
            payload: Some("rm -rf /".to_string()),
            ..cli(HookKind::PreCommand)
        };
        let invocation = build_invocation(&cli, None, no_env(), Path::new("/proc/cwd"));

        assert_eq!(invocation.kind(), HookKind::PreCommand);
        assert_eq!(invocation.command(), "rm -rf /");
        assert_eq!(invocation.cwd(), Path::new("/proc/cwd"));
    }

    #[test]
    fn test_stdin_tool_input() {
        let stdin = r#"{
            "session_id": "abc",
            "cwd": "/from/stdin",
            "hook_event_name": "PreToolUse",
            "tool_name": "Bash",
            "tool_input": {"command": "git push --force", "timeout": 120}
        }"#;
        let invocation = build_invocation(
            &cli(HookKind::PreCommand),
            Some(stdin),
            no_env(),
            Path::new("/proc/cwd"),
        );

        assert_eq!(invocation.command(), "git push --force");
        assert_eq!(invocation.cwd(), Path::new("/from/stdin"));
        assert_eq!(invocation.payload("tool_name"), Some("Bash"));
        assert_eq!(invocation.payload("timeout"), None);
    }

    #[test]
    fn test_project_dir_wins_over_stdin_cwd() {
        let cli = Cli {
            project_dir: Some(PathBuf::from("/explicit")),
            ..cli(HookKind::PreEdit)
        };
        let invocation = build_invocation(
            &cli,
            Some(r#"{"cwd": "/from/stdin"}"#),
            no_env(),
            Path::new("/proc/cwd"),
        );

        assert_eq!(invocation.cwd(), Path::new("/explicit"));
    }

    #[test]
    fn test_malformed_or_empty_stdin() {
        for stdin in ["", "   \n", "{ not json", "[1, 2]", "\"text\""] {
            let invocation = build_invocation(
                &cli(HookKind::PreCommand),
                Some(stdin),
                no_env(),
                Path::new("/proc/cwd"),
            );
            assert!(invocation.payload_entries().is_empty(), "{stdin:?}");
            assert_eq!(invocation.cwd(), Path::new("/proc/cwd"));
        }
    }

    #[test]
    fn test_environment_snapshot() {
        let env = vec![
            (COMMAND_ENV_VAR.to_string(), "DROP TABLE users".to_string()),
            ("PATH".to_string(), "/usr/bin".to_string()),
        ];
        let invocation =
            build_invocation(&cli(HookKind::PreCommand), None, env, Path::new("/proc/cwd"));

        assert_eq!(invocation.command(), "DROP TABLE users");
        assert_eq!(invocation.env("PATH"), None);
    }

    #[test]
    fn test_positional_overrides_stdin_command() {
        let cli = Cli {
            payload: Some("ls".to_string()),
            ..cli(HookKind::PreCommand)
        };
        let invocation = build_invocation(
            &cli,
            Some(r#"{"tool_input": {"command": "rm -rf /"}}"#),
            no_env(),
            Path::new("/proc/cwd"),
        );

        assert_eq!(invocation.command(), "ls");
    }
}
