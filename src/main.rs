//! Lifecycle hooks binary
//!
//! Run with: cargo run -- validate-command "rm -rf /"
//!
//! For help: cargo run -- --help

use std::io::{IsTerminal, Write};

use clap::Parser;
use clap::error::ErrorKind;
use lifecycle_hooks::{Cli, HookDecision, run_with_cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // A host must still get a decision for an invocation we cannot parse
            if let Err(print_err) = e.print() {
                eprintln!("Failed to print usage error: {print_err}");
            }
            print_decision(&HookDecision::allow());
            return;
        }
    };

    let decision = match run_with_cli(&cli).await {
        Ok(decision) => decision,
        Err(e) => {
            // stdout is reserved for the decision
            eprintln!("Error: {e:#}");

            if std::io::stderr().is_terminal() {
                eprintln!("\nFor debugging, run with --diagnostic to log to a file.");
                eprintln!("Or use -v/-vv/-vvv for more verbose logging.");
            }

            HookDecision::allow()
        }
    };

    print_decision(&decision);
}

fn print_decision(decision: &HookDecision) {
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", decision.to_json()) {
        eprintln!("Failed to write decision: {e}");
    }
}
