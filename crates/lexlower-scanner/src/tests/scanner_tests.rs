use crate::{ScannerState, SyntaxKind, token_flags};
use lexlower_common::diagnostic_codes;

fn scan_all(text: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(text.to_string());
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn test_scan_empty() {
    let mut scanner = ScannerState::new(String::new());
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_scan_identifier_and_keywords() {
    let mut scanner = ScannerState::new("let x = const".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "x");
    assert_eq!(scanner.get_token_start(), 4);
    assert_eq!(scanner.get_token_end(), 5);
    assert_eq!(scanner.scan(), SyntaxKind::EqualsToken);
    assert_eq!(scanner.scan(), SyntaxKind::ConstKeyword);
}

#[test]
fn test_scan_dollar_identifiers() {
    let mut scanner = ScannerState::new("$x _y x$1".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "$x");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "_y");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "x$1");
}

#[test]
fn test_escaped_keyword_is_identifier() {
    let mut scanner = ScannerState::new("\\u006cet".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "let");
    assert_eq!(scanner.get_token_text(), "\\u006cet");
    assert!(scanner.has_unicode_escape());
}

#[test]
fn test_scan_punctuation() {
    assert_eq!(
        scan_all("{}()[];,"),
        vec![
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
            SyntaxKind::OpenParenToken,
            SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::CloseBracketToken,
            SyntaxKind::SemicolonToken,
            SyntaxKind::CommaToken,
        ]
    );
}

#[test]
fn test_scan_compound_operators() {
    assert_eq!(
        scan_all("=== !== == != => && || ?? >>>= **= ..."),
        vec![
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::EqualsEqualsToken,
            SyntaxKind::ExclamationEqualsToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::AmpersandAmpersandToken,
            SyntaxKind::BarBarToken,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::AsteriskAsteriskEqualsToken,
            SyntaxKind::DotDotDotToken,
        ]
    );
}

#[test]
fn test_scan_string_with_escapes() {
    let mut scanner = ScannerState::new("'a\\nb\\x41\\u0042\\u{43}'".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "a\nbABC");
    assert!(!scanner.is_unterminated());
}

#[test]
fn test_unterminated_string_reports_diagnostic() {
    let mut scanner = ScannerState::new("\"abc\nx".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message.code,
        diagnostic_codes::UNTERMINATED_STRING_LITERAL
    );
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_scan_numbers() {
    for text in ["0", "42", "3.14", ".5", "1e10", "1E-3", "0x1F", "0o17", "0b101", "1_000", "10n"] {
        let mut scanner = ScannerState::new(text.to_string());
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral, "{text}");
        assert_eq!(scanner.get_token_value(), text);
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken, "{text}");
    }
}

#[test]
fn test_member_access_on_integer_literal_needs_space() {
    // `1.toString` scans as a number `1.` followed by an identifier.
    let kinds = scan_all("1..toString");
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::NumericLiteral,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    let mut scanner = ScannerState::new("// one\n/* two */ a /* multi\nline */ b".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "a");
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
    assert!(scanner.has_preceding_line_break());
}

#[test]
fn test_block_comment_without_line_break() {
    let mut scanner = ScannerState::new("a /* x */ b".to_string());
    scanner.scan();
    scanner.scan();
    assert!(!scanner.has_preceding_line_break());
}

#[test]
fn test_unterminated_comment() {
    let mut scanner = ScannerState::new("a /* never closed".to_string());
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message.code, diagnostic_codes::UNTERMINATED_COMMENT);
}

#[test]
fn test_hashbang_is_trivia() {
    let mut scanner = ScannerState::new("#!/usr/bin/env node\nfoo".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "foo");
}

#[test]
fn test_re_scan_slash_as_regex() {
    let mut scanner = ScannerState::new("/a[/]b\\//gi;".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(scanner.re_scan_slash_token(), SyntaxKind::RegularExpressionLiteral);
    assert_eq!(scanner.get_token_value(), "/a[/]b\\//gi");
    assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
}

#[test]
fn test_unterminated_regex() {
    let mut scanner = ScannerState::new("/abc\n".to_string());
    scanner.scan();
    scanner.re_scan_slash_token();
    assert!(scanner.is_unterminated());
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(
        diagnostics[0].message.code,
        diagnostic_codes::UNTERMINATED_REGULAR_EXPRESSION
    );
}

#[test]
fn test_plain_template_literal() {
    let mut scanner = ScannerState::new("`hello\nworld`".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.get_token_value(), "hello\nworld");
    assert!(scanner.take_diagnostics().is_empty());
}

#[test]
fn test_template_substitution_is_rejected() {
    let mut scanner = ScannerState::new("`a${b}c` + 1".to_string());
    assert_eq!(scanner.scan(), SyntaxKind::NoSubstitutionTemplateLiteral);
    assert_eq!(scanner.scan(), SyntaxKind::PlusToken);
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message.code, diagnostic_codes::UNSUPPORTED_SYNTAX);
    assert_eq!(diagnostics[0].arg, Some("template substitutions"));
}

#[test]
fn test_invalid_character() {
    let mut scanner = ScannerState::new("a @ b".to_string());
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    let diagnostics = scanner.take_diagnostics();
    assert_eq!(diagnostics[0].message.code, diagnostic_codes::INVALID_CHARACTER);
    assert_eq!(diagnostics[0].pos, 2);
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = ScannerState::new("a b 'x".to_string());
    scanner.scan();
    let snapshot = scanner.save_state();
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.get_token(), SyntaxKind::StringLiteral);
    scanner.restore_state(snapshot);
    assert_eq!(scanner.get_token(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "a");
    // The unterminated string diagnostic was rolled back with the state.
    assert!(scanner.take_diagnostics().is_empty());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_value(), "b");
}

#[test]
fn test_preceding_line_break_flag() {
    let mut scanner = ScannerState::new("a\r\nb c".to_string());
    scanner.scan();
    assert_eq!(scanner.get_token_flags(), token_flags::NONE);
    scanner.scan();
    assert!(scanner.has_preceding_line_break());
    scanner.scan();
    assert!(!scanner.has_preceding_line_break());
}

#[test]
fn test_syntax_kind_classification() {
    assert!(SyntaxKind::BreakKeyword.is_keyword());
    assert!(SyntaxKind::BreakKeyword.is_reserved_word());
    assert!(SyntaxKind::LetKeyword.is_contextual_keyword());
    assert!(!SyntaxKind::LetKeyword.is_reserved_word());
    assert!(!SyntaxKind::Identifier.is_keyword());
    assert!(SyntaxKind::PlusEqualsToken.is_assignment_operator());
    assert!(!SyntaxKind::PlusToken.is_assignment_operator());
    assert_eq!(SyntaxKind::InstanceOfKeyword.text(), "instanceof");
    assert_eq!(
        SyntaxKind::try_from_u16(SyntaxKind::WhileKeyword as u16),
        Some(SyntaxKind::WhileKeyword)
    );
    assert_eq!(SyntaxKind::try_from_u16(SyntaxKind::LAST_TOKEN as u16 + 1), None);
}
