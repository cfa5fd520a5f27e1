//! Hygienic block-scope lowering for lexlower.
//!
//! This crate provides:
//! - `varify` - `LoweringState`, which hoists every `let`/`const` of a bound
//!   source file to its function scope as a `var`, renaming where the move
//!   would collide, and records the text edits that realize it
//! - `patcher` - applies those edits to the original source text
//! - `stats` - `LoweringStats`, the const/let counts and rename report
//! - `error` - `LoweringError`, internal invariant violations

pub mod error;
pub use error::LoweringError;

pub mod patcher;
pub use patcher::{Edit, apply_edits};

pub mod stats;
pub use stats::{LoweringStats, Rename};

pub mod varify;
pub use varify::LoweringState;

#[cfg(test)]
#[path = "tests/patcher_tests.rs"]
mod patcher_tests;
#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod stats_tests;
#[cfg(test)]
#[path = "tests/varify_tests.rs"]
mod varify_tests;
