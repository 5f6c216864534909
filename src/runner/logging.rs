//! Logging initialization
//!
//! stdout carries the decision, so logs only ever go to stderr or a file.

use tracing_subscriber::prelude::*;

use crate::cli::Cli;

/// Build an EnvFilter based on CLI args and RUST_LOG environment variable
///
/// Priority: RUST_LOG environment variable > CLI arguments (-v, -vv, -q)
pub(crate) fn build_env_filter(cli: &Cli) -> tracing_subscriber::EnvFilter {
    if let Ok(rust_log) = std::env::var("RUST_LOG")
        && !rust_log.is_empty()
    {
        return tracing_subscriber::EnvFilter::new(rust_log);
    }

    let level = cli.log_level();
    tracing_subscriber::EnvFilter::default().add_directive(level.into())
}

/// Initialize logging with file output (diagnostic mode)
fn init_logging_to_file(cli: &Cli) -> anyhow::Result<()> {
    let filter = build_env_filter(cli);

    let log_path = cli.log_path();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    eprintln!("Diagnostic mode: logging to {}", log_path.display());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging with stderr output (normal mode)
fn init_logging_to_stderr(cli: &Cli) -> anyhow::Result<()> {
    let filter = build_env_filter(cli);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging based on CLI arguments
pub(crate) fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    if cli.is_diagnostic() {
        init_logging_to_file(cli)
    } else {
        init_logging_to_stderr(cli)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_filter_follows_cli_level() {
        if std::env::var("RUST_LOG").is_ok_and(|v| !v.is_empty()) {
            return;
        }

        let cli = Cli {
            verbose: 2,
            ..Default::default()
        };
        assert_eq!(
            build_env_filter(&cli).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );

        let cli = Cli {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(
            build_env_filter(&cli).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }
}
