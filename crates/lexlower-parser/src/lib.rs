//! JavaScript front-end for lexlower.
//!
//! This crate provides:
//! - `parser` - arena-allocated syntax tree (`NodeArena`, `Node`, `NodeIndex`) and
//!   the recursive-descent `ParserState`
//! - `walker` - depth-first pre/post traversal and parent linking
//! - `references` - classification of identifier occurrences into uses and
//!   declaration slots
//! - `estree` - JSON export of the tree in ESTree shape

pub mod parser;
pub use parser::{
    NodeArena, NodeIndex, NodeList, ParseDiagnostic, ParserState, node_flags, syntax_kind_ext,
};

pub mod walker;
pub use walker::{Visitor, WalkControl, link_parents, walk, walk_pre, walk_with};

pub mod references;
pub use references::{is_declaration_name, is_lvalue, is_reference};

pub mod estree;

#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod parser_tests;
#[cfg(test)]
#[path = "tests/walker_tests.rs"]
mod walker_tests;
#[cfg(test)]
#[path = "tests/references_tests.rs"]
mod references_tests;
#[cfg(test)]
#[path = "tests/estree_tests.rs"]
mod estree_tests;
