//! Scope tree and reference binder for lexlower.
//!
//! This crate provides:
//! - `scope` - `ScopeArena`, `Scope`, `ScopeKind`, `Declaration`, `DeclarationKind`
//! - `state` - `BinderState`, which builds the scope tree of a parsed source
//!   file and resolves every identifier use against it
//! - `environment` - standard-environment presets used to seed the outermost
//!   scope

pub mod scope;
pub use scope::{Declaration, DeclarationKind, Move, Scope, ScopeArena, ScopeId, ScopeKind};

pub mod state;
pub use state::{BinderOptions, BinderState, Reference};

mod state_binding;
pub use state_binding::collect_binding_identifiers;

mod state_references;

pub mod environment;
pub use environment::{EnvironmentPreset, PRESETS, find_preset};

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;
#[cfg(test)]
#[path = "tests/binder_tests.rs"]
mod binder_tests;
#[cfg(test)]
#[path = "tests/environment_tests.rs"]
mod environment_tests;
