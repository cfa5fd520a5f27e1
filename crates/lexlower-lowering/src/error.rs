//! Internal errors of the lowering transform.
//!
//! None of these are user mistakes. User-facing problems are reported as
//! diagnostics before lowering starts; reaching one of these means an
//! invariant of the pipeline was broken.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoweringError {
    /// An edit ends before it starts, or past the end of the source.
    #[error("invalid edit [{start}, {end}) for source of length {source_len}")]
    InvalidEdit { start: u32, end: u32, source_len: usize },

    /// Two edits touch the same bytes.
    #[error("edit at {start} overlaps the previous edit ending at {previous_end}")]
    OverlappingEdits { start: u32, previous_end: u32 },

    /// An edit boundary falls inside a multi-byte character.
    #[error("edit boundary {offset} is not a character boundary")]
    NotCharBoundary { offset: u32 },

    /// No `name$N` was free within the attempt limit.
    #[error("no fresh name for {name} after {attempts} attempts")]
    RenameExhausted { name: String, attempts: u32 },

    /// A declaration with no enclosing scope, or a leaf that is not an
    /// identifier.
    #[error("no scope encloses node {node}")]
    MissingScope { node: u32 },

    /// A scope id with no scope behind it.
    #[error("scope {scope} does not exist")]
    UnknownScope { scope: u32 },

    /// A bound name the scope tree does not know.
    #[error("{name} is not declared in its scope")]
    MissingDeclaration { name: String },
}
