//! Parser state: token cursor, diagnostics and shared helpers.
//!
//! Statement parsing lives in `state_statements.rs` and expression parsing
//! in `state_expressions.rs`; both are `impl ParserState` blocks.

use lexlower_common::{DiagnosticMessage, format_message, limits, messages};
use lexlower_scanner::{ScannerState, SyntaxKind};
use serde::Serialize;

use super::base::{NodeIndex, NodeList};
use super::node::NodeArena;

/// A syntax error with a byte span.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

/// Recursive-descent parser producing a [`NodeArena`].
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) file_name: String,
    pub(crate) parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) current_token: SyntaxKind,
    /// End of the most recently consumed token.
    pub(crate) prev_token_end: u32,
    pub(crate) recursion_depth: u32,
    /// Position of the last reported error, to avoid cascades.
    last_error_pos: Option<u32>,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> ParserState {
        let capacity = source_text.len() / 4;
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::with_capacity(capacity),
            file_name,
            parse_diagnostics: Vec::new(),
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            recursion_depth: 0,
            last_error_pos: None,
        }
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    pub fn get_source_text(&self) -> &str {
        self.scanner.source_text()
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_start()
    }

    /// End of the last consumed token, i.e. the end of the node being built.
    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.prev_token_end
    }

    pub(crate) fn token_value(&self) -> &str {
        self.scanner.get_token_value()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.get_token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_at_current_token(&messages::TOKEN_EXPECTED, &[kind.text()]);
        false
    }

    /// Identifier, including contextual keywords that are valid binding names
    /// outside their special position (`let`, `of`, `async`, ...).
    pub(crate) fn is_identifier(&self) -> bool {
        self.current_token == SyntaxKind::Identifier || self.current_token.is_contextual_keyword()
    }

    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.scanner.is_identifier_or_keyword()
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.has_preceding_line_break()
    }

    /// Consume a `;` or accept automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.can_parse_semicolon() {
            return true;
        }
        self.error_at_current_token(&messages::TOKEN_EXPECTED, &[";"]);
        false
    }

    /// Run `f` with the scanner rewound afterwards; returns what `f` saw.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut ParserState) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let saved_token = self.current_token;
        let saved_prev_end = self.prev_token_end;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = saved_token;
        self.prev_token_end = saved_prev_end;
        result
    }

    pub(crate) fn make_node_list(&self, nodes: Vec<NodeIndex>, pos: u32) -> NodeList {
        NodeList::with_nodes(nodes, pos, self.token_end())
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= limits::MAX_PARSE_DEPTH {
            if self.recursion_depth == limits::MAX_PARSE_DEPTH {
                self.error_at_current_token(&messages::NESTING_TOO_DEEP, &[]);
                // Report once, then keep failing quietly.
                self.recursion_depth += 1;
            }
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at(&mut self, start: u32, length: u32, message: &DiagnosticMessage, args: &[&str]) {
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: format_message(message.message, args),
            code: message.code,
        });
    }

    pub(crate) fn error_at_current_token(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let start = self.token_pos();
        let length = self.scanner.get_token_end().saturating_sub(start);
        self.error_at(start, length, message, args);
    }

    /// Report the current token as unexpected.
    pub(crate) fn error_unexpected_token(&mut self) {
        let text = if self.is_token(SyntaxKind::EndOfFileToken) {
            "end of input".to_string()
        } else {
            self.scanner.get_token_text().to_string()
        };
        self.error_at_current_token(&messages::UNEXPECTED_TOKEN, &[&text]);
    }

    /// Report a construct outside the supported language subset.
    pub(crate) fn error_unsupported(&mut self, start: u32, what: &str) {
        let length = self.scanner.get_token_end().saturating_sub(start);
        self.error_at(start, length, &messages::UNSUPPORTED_SYNTAX, &[what]);
    }

    /// Move scanner diagnostics into the parse diagnostic list.
    pub(crate) fn collect_scanner_diagnostics(&mut self) {
        for diag in self.scanner.take_diagnostics() {
            let args: Vec<&str> = diag.arg.into_iter().collect();
            self.parse_diagnostics.push(ParseDiagnostic {
                start: diag.pos,
                length: diag.length,
                message: format_message(diag.message.message, &args),
                code: diag.message.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
    }

    /// Placeholder identifier for a name or expression the parser could not
    /// produce. Only ever present alongside a parse diagnostic.
    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let index = self.arena.add_identifier(pos, pos, String::new());
        if let Some(node) = self.arena.get_mut(index) {
            node.flags |= super::node::node_flags::MISSING;
        }
        index
    }
}
