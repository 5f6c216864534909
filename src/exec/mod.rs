//! External command execution
//!
//! Every collaborator the hooks talk to (git, desktop notifiers, sound
//! players) is reached through [`CommandRunner`], so hooks can be tested with
//! a scripted runner instead of real programs.

mod runner;

pub use runner::{CommandOutput, CommandRunner, SystemCommandRunner};
