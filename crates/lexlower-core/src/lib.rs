//! lexlower: lower block-scoped `let`/`const` declarations to `var`.
//!
//! One call runs the whole pipeline on a source text:
//!
//! 1. parse (`lexlower-parser`);
//! 2. build scopes, seed globals and resolve references (`lexlower-binder`);
//! 3. run the static checks (`lexlower-checker`);
//! 4. if nothing blocking was found, lower and patch (`lexlower-lowering`).
//!
//! ```no_run
//! use lexlower_core::{LowerOptions, lower_source};
//!
//! let output = lower_source("{ let x = 1; }", &LowerOptions::default())?;
//! assert_eq!(output, "{ var x = 1; }");
//! # Ok::<(), lexlower_core::LowerError>(())
//! ```

pub mod options;
pub use options::LowerOptions;

pub mod error;
pub use error::LowerError;

pub mod session;
pub use session::{Emit, LowerOutput, LoweringSession, lower, lower_source};

pub use lexlower_common::{Diagnostic, DiagnosticCategory, DiagnosticLine};
pub use lexlower_lowering::{LoweringError, LoweringStats, Rename};

#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod options_tests;
#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod session_tests;
