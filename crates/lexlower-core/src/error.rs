//! Errors returned by the library entry points.

use lexlower_common::Diagnostic;
use lexlower_lowering::LoweringError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LowerError {
    /// The input has problems; lowering did not run. Diagnostics are in
    /// pipeline order and may include warnings.
    #[error("{}", render(.0))]
    Diagnostics(Vec<Diagnostic>),

    /// An invariant of the pipeline broke.
    #[error("internal error: {0}")]
    Internal(#[from] LoweringError),
}

impl LowerError {
    /// Diagnostics of a rejected input, empty for internal errors.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Diagnostics(diagnostics) => diagnostics,
            Self::Internal(_) => &[],
        }
    }
}

fn render(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
