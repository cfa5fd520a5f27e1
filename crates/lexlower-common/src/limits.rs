//! Centralized limits and thresholds.
//!
//! These bound recursion in the front-end and the traversal passes, and the
//! otherwise unbounded search for fresh identifier names during renaming.

/// Maximum syntactic nesting depth accepted by the parser.
///
/// Deeper input is rejected with a parse diagnostic instead of risking a stack
/// overflow in the recursive-descent parser or in the recursive tree walker.
pub const MAX_PARSE_DEPTH: u32 = 500;

/// Maximum number of `name$N` candidates tried when generating a fresh name.
///
/// A program would need this many colliding identifiers for the search to
/// fail; exhausting it is treated as an internal invariant violation.
pub const MAX_RENAME_ATTEMPTS: u32 = 1_000_000;
