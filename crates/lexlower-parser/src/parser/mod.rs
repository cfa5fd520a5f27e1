//! Parser and syntax tree.

pub mod base;
pub use base::{NodeIndex, NodeList};

pub mod syntax_kind_ext;

pub mod node;
pub use node::*;

mod node_access;

pub mod state;
pub use state::{ParseDiagnostic, ParserState};

pub(crate) mod state_expressions;
mod state_statements;
