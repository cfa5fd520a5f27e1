//! Diagnostic types and message lookup.
//!
//! Every user-facing problem the engine finds is a [`Diagnostic`]. They are
//! collected rather than thrown so that a single run reports every problem in
//! the input. Message templates live in `data.rs` and use `{0}`-style
//! placeholders filled in by [`format_message`].

use serde::{Serialize, Serializer};
use std::fmt;

mod data;
pub use data::{
    DIAGNOSTIC_MESSAGES, DiagnosticMessage, diagnostic_codes, diagnostic_messages, messages,
};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Message = 3,
}

impl DiagnosticCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Message => "message",
        }
    }
}

/// Where a diagnostic points: a 1-based source line, or nowhere in
/// particular (configuration problems).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticLine {
    Global,
    Line(u32),
}

impl DiagnosticLine {
    pub const fn number(self) -> Option<u32> {
        match self {
            Self::Global => None,
            Self::Line(line) => Some(line),
        }
    }
}

impl fmt::Display for DiagnosticLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Line(line) => write!(f, "{line}"),
        }
    }
}

/// Serialized as the bare line number, or the string `"global"`.
impl Serialize for DiagnosticLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Global => serializer.serialize_str("global"),
            Self::Line(line) => serializer.serialize_u32(*line),
        }
    }
}

/// Related information for a diagnostic (e.g. where the offending loop starts).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticRelatedInformation {
    pub line: DiagnosticLine,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A lowering diagnostic with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub line: DiagnosticLine,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(line: u32, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            line: DiagnosticLine::Line(line),
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Create a new warning diagnostic.
    #[must_use]
    pub fn warning(line: u32, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            ..Self::error(line, start, length, message, code)
        }
    }

    /// Create an error that is not tied to any source location.
    #[must_use]
    pub fn global_error(message: String, code: u32) -> Self {
        Self {
            line: DiagnosticLine::Global,
            start: 0,
            length: 0,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Create a diagnostic from a message table entry, filling in `args`.
    #[must_use]
    pub fn from_message(
        message: &DiagnosticMessage,
        line: DiagnosticLine,
        start: u32,
        length: u32,
        args: &[&str],
    ) -> Self {
        Self {
            line,
            start,
            length,
            message_text: format_message(message.message, args),
            category: message.category,
            code: message.code,
            related_information: Vec::new(),
        }
    }

    /// Attach a related location, rendered from a message table entry.
    #[must_use]
    pub fn with_related(
        mut self,
        message: &DiagnosticMessage,
        line: u32,
        start: u32,
        length: u32,
        args: &[&str],
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            line: DiagnosticLine::Line(line),
            start,
            length,
            message_text: format_message(message.message, args),
            category: message.category,
            code: message.code,
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// `line 3: x is referenced before its declaration`
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            DiagnosticLine::Global => write!(f, "global: {}", self.message_text),
            DiagnosticLine::Line(line) => write!(f, "line {line}: {}", self.message_text),
        }
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}
