//! Scanner state machine.
//!
//! `ScannerState` turns source text into a stream of [`SyntaxKind`] tokens,
//! skipping whitespace and comments. Problems (unterminated literals, stray
//! characters) are recorded as [`ScannerDiagnostic`]s and scanning continues,
//! so the parser can keep going and report everything in one pass.
//!
//! Token positions are byte offsets into the source text.

use std::sync::Arc;

use lexlower_common::{DiagnosticMessage, messages};
use memchr::memmem;

use crate::SyntaxKind;
use crate::char_codes::{is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line};
use crate::syntax_kind::text_to_keyword;

/// Bit flags describing the current token.
pub mod token_flags {
    pub const NONE: u32 = 0;
    /// A line terminator appeared between the previous token and this one.
    pub const PRECEDING_LINE_BREAK: u32 = 1 << 0;
    /// String, template, comment or regex ran into the end of its line or file.
    pub const UNTERMINATED: u32 = 1 << 1;
    /// Identifier contained a `\u` escape.
    pub const UNICODE_ESCAPE: u32 = 1 << 2;
}

/// A lexical error found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: u32,
    pub length: u32,
    pub message: DiagnosticMessage,
    pub arg: Option<&'static str>,
}

/// Everything needed to rewind the scanner for lookahead.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
    diagnostics_len: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    end: usize,
    /// Start of the token including leading trivia.
    full_start: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: u32,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        let text: Arc<str> = Arc::from(text);
        let end = text.len();
        Self {
            text,
            pos: 0,
            end,
            full_start: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: token_flags::NONE,
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    pub fn get_token_full_start(&self) -> u32 {
        self.full_start as u32
    }

    pub fn get_token_start(&self) -> u32 {
        self.token_start as u32
    }

    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Cooked value: escapes resolved for strings and identifiers, raw text
    /// for numbers and regular expressions.
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    pub fn get_token_flags(&self) -> u32 {
        self.token_flags
    }

    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags & token_flags::PRECEDING_LINE_BREAK != 0
    }

    pub fn is_unterminated(&self) -> bool {
        self.token_flags & token_flags::UNTERMINATED != 0
    }

    pub fn has_unicode_escape(&self) -> bool {
        self.token_flags & token_flags::UNICODE_ESCAPE != 0
    }

    /// Identifier or keyword, including contextual keywords.
    pub fn is_identifier_or_keyword(&self) -> bool {
        self.token == SyntaxKind::Identifier || self.token.is_keyword()
    }

    pub fn take_diagnostics(&mut self) -> Vec<ScannerDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    // =========================================================================
    // Lookahead support
    // =========================================================================

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start: self.full_start,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostics_len: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start = snapshot.full_start;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.diagnostics.truncate(snapshot.diagnostics_len);
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.end {
            return None;
        }
        self.text[pos..].chars().next()
    }

    fn error(&mut self, message: DiagnosticMessage, pos: usize, length: usize) {
        self.diagnostics.push(ScannerDiagnostic {
            pos: pos as u32,
            length: length as u32,
            message,
            arg: None,
        });
    }

    fn error_with_arg(&mut self, message: DiagnosticMessage, pos: usize, length: usize, arg: &'static str) {
        self.diagnostics.push(ScannerDiagnostic {
            pos: pos as u32,
            length: length as u32,
            message,
            arg: Some(arg),
        });
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Advance to the next token.
    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start = self.pos;
        self.token_flags = token_flags::NONE;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.char_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '"' | '\'' => self.scan_string(ch),
            '`' => self.scan_template(),
            '0'..='9' => self.scan_number(),
            '.' => {
                if self.byte_at(self.pos + 1).is_some_and(|b| b.is_ascii_digit()) {
                    self.scan_number()
                } else if self.text[self.pos..].starts_with("...") {
                    self.pos += 3;
                    SyntaxKind::DotDotDotToken
                } else {
                    self.pos += 1;
                    SyntaxKind::DotToken
                }
            }
            '\\' => self.scan_identifier(),
            c if is_identifier_start(c) => self.scan_identifier(),
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn skip_trivia(&mut self) {
        if self.pos == 0 && self.text.starts_with("#!") {
            self.skip_line_comment();
        }
        while let Some(ch) = self.char_at(self.pos) {
            if is_line_break(ch) {
                self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
                self.pos += ch.len_utf8();
            } else if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '/' && self.byte_at(self.pos + 1) == Some(b'/') {
                self.skip_line_comment();
            } else if ch == '/' && self.byte_at(self.pos + 1) == Some(b'*') {
                self.skip_block_comment();
            } else {
                break;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..self.end];
        match memchr::memchr2(b'\n', b'\r', rest) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.end,
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.pos;
        let body_start = self.pos + 2;
        let rest = &self.text.as_bytes()[body_start..self.end];
        let body_end = match memmem::find(rest, b"*/") {
            Some(offset) => {
                self.pos = body_start + offset + 2;
                body_start + offset
            }
            None => {
                self.pos = self.end;
                self.token_flags |= token_flags::UNTERMINATED;
                self.error(messages::UNTERMINATED_COMMENT, self.end, 0);
                self.end
            }
        };
        if self.text[start..body_end].chars().any(is_line_break) {
            self.token_flags |= token_flags::PRECEDING_LINE_BREAK;
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        let mut value = String::new();
        let mut escaped = false;
        while let Some(ch) = self.char_at(self.pos) {
            if ch == '\\' {
                let escape_start = self.pos;
                if self.byte_at(self.pos + 1) != Some(b'u') {
                    break;
                }
                self.pos += 2;
                match self.scan_unicode_escape_value() {
                    Some(decoded)
                        if (value.is_empty() && is_identifier_start(decoded))
                            || (!value.is_empty() && is_identifier_part(decoded)) =>
                    {
                        value.push(decoded);
                        escaped = true;
                    }
                    _ => {
                        self.error(messages::INVALID_CHARACTER, escape_start, self.pos - escape_start);
                    }
                }
            } else if (value.is_empty() && is_identifier_start(ch))
                || (!value.is_empty() && is_identifier_part(ch))
            {
                value.push(ch);
                self.pos += ch.len_utf8();
            } else {
                break;
            }
        }

        if self.pos == start {
            // Lone backslash.
            self.pos += 1;
            self.error(messages::INVALID_CHARACTER, start, 1);
            return SyntaxKind::Unknown;
        }

        if escaped {
            self.token_flags |= token_flags::UNICODE_ESCAPE;
        }
        let kind = if escaped {
            // Escaped keywords are never keywords.
            SyntaxKind::Identifier
        } else {
            text_to_keyword(&value).unwrap_or(SyntaxKind::Identifier)
        };
        self.token_value = value;
        kind
    }

    /// Decode the part after `\u`: either `XXXX` or `{X...}`.
    fn scan_unicode_escape_value(&mut self) -> Option<char> {
        if self.byte_at(self.pos) == Some(b'{') {
            let digits_start = self.pos + 1;
            let mut cursor = digits_start;
            while self.byte_at(cursor).is_some_and(|b| b.is_ascii_hexdigit()) {
                cursor += 1;
            }
            if cursor == digits_start || self.byte_at(cursor) != Some(b'}') {
                self.pos = cursor;
                return None;
            }
            let value = u32::from_str_radix(&self.text[digits_start..cursor], 16).ok();
            self.pos = cursor + 1;
            value.and_then(char::from_u32)
        } else {
            self.scan_hex_digits(4)
        }
    }

    fn scan_hex_digits(&mut self, count: usize) -> Option<char> {
        let digits_end = self.pos + count;
        if digits_end > self.end
            || !self.text.as_bytes()[self.pos..digits_end]
                .iter()
                .all(u8::is_ascii_hexdigit)
        {
            return None;
        }
        let value = u32::from_str_radix(&self.text[self.pos..digits_end], 16).ok();
        self.pos = digits_end;
        value.and_then(char::from_u32)
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= token_flags::UNTERMINATED;
                self.error(messages::UNTERMINATED_STRING_LITERAL, start, self.pos - start);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                self.scan_escape_sequence(&mut value);
                continue;
            }
            if ch == '\n' || ch == '\r' {
                self.token_flags |= token_flags::UNTERMINATED;
                self.error(messages::UNTERMINATED_STRING_LITERAL, start, self.pos - start);
                break;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    /// Called with `pos` just past the backslash.
    fn scan_escape_sequence(&mut self, out: &mut String) {
        let Some(ch) = self.char_at(self.pos) else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !self.byte_at(self.pos).is_some_and(|b| b.is_ascii_digit()) => out.push('\0'),
            'x' => match self.scan_hex_digits(2) {
                Some(decoded) => out.push(decoded),
                None => out.push('x'),
            },
            'u' => match self.scan_unicode_escape_value() {
                Some(decoded) => out.push(decoded),
                None => out.push('u'),
            },
            // Line continuation.
            '\r' => {
                if self.byte_at(self.pos) == Some(b'\n') {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    fn scan_template(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= token_flags::UNTERMINATED;
                self.error(messages::UNTERMINATED_TEMPLATE_LITERAL, start, self.pos - start);
                break;
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break;
                }
                '\\' => {
                    self.pos += 1;
                    self.scan_escape_sequence(&mut value);
                }
                '$' if self.byte_at(self.pos + 1) == Some(b'{') => {
                    self.error_with_arg(
                        messages::UNSUPPORTED_SYNTAX,
                        self.pos,
                        2,
                        "template substitutions",
                    );
                    self.skip_template_substitution();
                }
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
        self.token_value = value;
        SyntaxKind::NoSubstitutionTemplateLiteral
    }

    /// Skip a `${ ... }` span by brace depth so the rest of the file still
    /// scans sensibly.
    fn skip_template_substitution(&mut self) {
        self.pos += 2;
        let mut depth = 1u32;
        while let Some(ch) = self.char_at(self.pos) {
            self.pos += ch.len_utf8();
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        let radix_prefix = if bytes[start] == b'0' {
            match self.byte_at(start + 1) {
                Some(b'x' | b'X') => Some(16),
                Some(b'o' | b'O') => Some(8),
                Some(b'b' | b'B') => Some(2),
                _ => None,
            }
        } else {
            None
        };

        if let Some(radix) = radix_prefix {
            self.pos += 2;
            while self
                .byte_at(self.pos)
                .is_some_and(|b| b == b'_' || (b as char).is_digit(radix))
            {
                self.pos += 1;
            }
        } else {
            self.skip_decimal_digits();
            if self.byte_at(self.pos) == Some(b'.') {
                self.pos += 1;
                self.skip_decimal_digits();
            }
            if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
                let mut cursor = self.pos + 1;
                if matches!(self.byte_at(cursor), Some(b'+' | b'-')) {
                    cursor += 1;
                }
                if self.byte_at(cursor).is_some_and(|b| b.is_ascii_digit()) {
                    self.pos = cursor;
                    self.skip_decimal_digits();
                }
            }
        }

        // BigInt suffix
        if self.byte_at(self.pos) == Some(b'n') {
            self.pos += 1;
        }

        if let Some(ch) = self.char_at(self.pos)
            && is_identifier_start(ch)
        {
            // `3in` and friends: an identifier may not directly follow a number.
            self.error(messages::INVALID_CHARACTER, self.pos, ch.len_utf8());
        }

        self.token_value = self.text[start..self.pos].to_string();
        SyntaxKind::NumericLiteral
    }

    fn skip_decimal_digits(&mut self) {
        while self
            .byte_at(self.pos)
            .is_some_and(|b| b.is_ascii_digit() || b == b'_')
        {
            self.pos += 1;
        }
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        use SyntaxKind::*;
        let rest = &self.text[self.pos..];
        let (kind, len) = match ch {
            '{' => (OpenBraceToken, 1),
            '}' => (CloseBraceToken, 1),
            '(' => (OpenParenToken, 1),
            ')' => (CloseParenToken, 1),
            '[' => (OpenBracketToken, 1),
            ']' => (CloseBracketToken, 1),
            ';' => (SemicolonToken, 1),
            ',' => (CommaToken, 1),
            ':' => (ColonToken, 1),
            '~' => (TildeToken, 1),
            '?' => {
                if rest.starts_with("??") {
                    (QuestionQuestionToken, 2)
                } else {
                    (QuestionToken, 1)
                }
            }
            '=' => {
                if rest.starts_with("===") {
                    (EqualsEqualsEqualsToken, 3)
                } else if rest.starts_with("==") {
                    (EqualsEqualsToken, 2)
                } else if rest.starts_with("=>") {
                    (EqualsGreaterThanToken, 2)
                } else {
                    (EqualsToken, 1)
                }
            }
            '!' => {
                if rest.starts_with("!==") {
                    (ExclamationEqualsEqualsToken, 3)
                } else if rest.starts_with("!=") {
                    (ExclamationEqualsToken, 2)
                } else {
                    (ExclamationToken, 1)
                }
            }
            '+' => {
                if rest.starts_with("++") {
                    (PlusPlusToken, 2)
                } else if rest.starts_with("+=") {
                    (PlusEqualsToken, 2)
                } else {
                    (PlusToken, 1)
                }
            }
            '-' => {
                if rest.starts_with("--") {
                    (MinusMinusToken, 2)
                } else if rest.starts_with("-=") {
                    (MinusEqualsToken, 2)
                } else {
                    (MinusToken, 1)
                }
            }
            '*' => {
                if rest.starts_with("**=") {
                    (AsteriskAsteriskEqualsToken, 3)
                } else if rest.starts_with("**") {
                    (AsteriskAsteriskToken, 2)
                } else if rest.starts_with("*=") {
                    (AsteriskEqualsToken, 2)
                } else {
                    (AsteriskToken, 1)
                }
            }
            '/' => {
                if rest.starts_with("/=") {
                    (SlashEqualsToken, 2)
                } else {
                    (SlashToken, 1)
                }
            }
            '%' => {
                if rest.starts_with("%=") {
                    (PercentEqualsToken, 2)
                } else {
                    (PercentToken, 1)
                }
            }
            '<' => {
                if rest.starts_with("<<=") {
                    (LessThanLessThanEqualsToken, 3)
                } else if rest.starts_with("<<") {
                    (LessThanLessThanToken, 2)
                } else if rest.starts_with("<=") {
                    (LessThanEqualsToken, 2)
                } else {
                    (LessThanToken, 1)
                }
            }
            '>' => {
                if rest.starts_with(">>>=") {
                    (GreaterThanGreaterThanGreaterThanEqualsToken, 4)
                } else if rest.starts_with(">>>") {
                    (GreaterThanGreaterThanGreaterThanToken, 3)
                } else if rest.starts_with(">>=") {
                    (GreaterThanGreaterThanEqualsToken, 3)
                } else if rest.starts_with(">>") {
                    (GreaterThanGreaterThanToken, 2)
                } else if rest.starts_with(">=") {
                    (GreaterThanEqualsToken, 2)
                } else {
                    (GreaterThanToken, 1)
                }
            }
            '&' => {
                if rest.starts_with("&&") {
                    (AmpersandAmpersandToken, 2)
                } else if rest.starts_with("&=") {
                    (AmpersandEqualsToken, 2)
                } else {
                    (AmpersandToken, 1)
                }
            }
            '|' => {
                if rest.starts_with("||") {
                    (BarBarToken, 2)
                } else if rest.starts_with("|=") {
                    (BarEqualsToken, 2)
                } else {
                    (BarToken, 1)
                }
            }
            '^' => {
                if rest.starts_with("^=") {
                    (CaretEqualsToken, 2)
                } else {
                    (CaretToken, 1)
                }
            }
            other => {
                let len = other.len_utf8();
                self.error(messages::INVALID_CHARACTER, self.pos, len);
                (Unknown, len)
            }
        };
        self.pos += len;
        kind
    }

    /// Re-scan a `/` or `/=` token as a regular expression literal. The parser
    /// calls this when a slash appears where an expression is expected.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        let start = self.token_start;
        self.pos = start + 1;
        let mut in_class = false;
        let mut in_escape = false;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= token_flags::UNTERMINATED;
                self.error(messages::UNTERMINATED_REGULAR_EXPRESSION, start, self.pos - start);
                break;
            };
            if is_line_break(ch) {
                self.token_flags |= token_flags::UNTERMINATED;
                self.error(messages::UNTERMINATED_REGULAR_EXPRESSION, start, self.pos - start);
                break;
            }
            self.pos += ch.len_utf8();
            if in_escape {
                in_escape = false;
            } else if ch == '\\' {
                in_escape = true;
            } else if ch == '[' {
                in_class = true;
            } else if ch == ']' {
                in_class = false;
            } else if ch == '/' && !in_class {
                break;
            }
        }
        if !self.is_unterminated() {
            while let Some(ch) = self.char_at(self.pos)
                && is_identifier_part(ch)
            {
                self.pos += ch.len_utf8();
            }
        }
        self.token_value = self.text[start..self.pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }
}
