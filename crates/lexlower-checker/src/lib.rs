//! Static legality checks for lexlower.
//!
//! Runs on a parsed and bound source file and reports what would make
//! lowering `let`/`const` to `var` unsafe:
//! - `loop_closures` - closures inside loops capturing per-iteration bindings
//! - `assignment_checker` - writes to `const` bindings (and `written` marks)
//! - `unmodified_lets` - optional advisory for `let`s that could be `const`

pub mod state;
pub use state::{CheckerOptions, CheckerState};

mod assignment_checker;
mod loop_closures;
mod unmodified_lets;

#[cfg(test)]
#[path = "tests/loop_closures_tests.rs"]
mod loop_closures_tests;
#[cfg(test)]
#[path = "tests/assignment_checker_tests.rs"]
mod assignment_checker_tests;
#[cfg(test)]
#[path = "tests/unmodified_lets_tests.rs"]
mod unmodified_lets_tests;
