//! Common types and utilities for the lexlower block-scope lowering tool.
//!
//! This crate provides foundational types used across all lexlower crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, `DiagnosticLine`) and the
//!   message table they are rendered from
//! - Line maps for turning byte offsets into line numbers
//! - Centralized limits and thresholds

// Diagnostics and the message table
pub mod diagnostics;
pub use diagnostics::{
    DIAGNOSTIC_MESSAGES, Diagnostic, DiagnosticCategory, DiagnosticLine, DiagnosticMessage,
    DiagnosticRelatedInformation, diagnostic_codes, diagnostic_messages, format_message,
    get_message_template, messages,
};

// Position types for line lookup
pub mod position;
pub use position::LineMap;

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
