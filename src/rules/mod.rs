//! Static rule sets consulted by the protective hooks

mod branch;
mod dangerous;

pub use branch::{DEFAULT_PROTECTED_BRANCHES, ProtectedBranchSet};
pub use dangerous::{
    BLOCKED_COMMAND_MESSAGE, CommandMatcher, DangerousCommandRules, PatternRule,
};
